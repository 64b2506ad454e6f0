use serde::Serializer;

pub(crate) fn round_float<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64((value * 1000.0).round() / 1000.0)
}

pub(crate) fn as_millis(duration: std::time::Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
