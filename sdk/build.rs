use tonic_build::manual::{Builder, Method, Service};

const PROST_CODEC: &str = "tonic::codec::ProstCodec";

fn method(name: &str, route_name: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route_name)
        .input_type(format!("crate::grpc::proto::{input}"))
        .output_type(format!("crate::grpc::proto::{output}"))
        .codec_path(PROST_CODEC)
        .build()
}

fn main() {
    // The message types are plain prost structs in src/grpc/proto.rs, so only
    // the service stubs are generated and no protoc binary is needed.
    let service = Service::builder()
        .name("UserService")
        .package("users")
        .method(method(
            "get_users",
            "GetUsers",
            "GetUsersRequest",
            "GetUsersResponse",
        ))
        .method(method(
            "get_user",
            "GetUser",
            "GetUserRequest",
            "GetUserResponse",
        ))
        .method(method(
            "create_user",
            "CreateUser",
            "CreateUserRequest",
            "CreateUserResponse",
        ))
        .method(method(
            "update_user",
            "UpdateUser",
            "UpdateUserRequest",
            "UpdateUserResponse",
        ))
        .method(method(
            "delete_user",
            "DeleteUser",
            "DeleteUserRequest",
            "DeleteUserResponse",
        ))
        .method(method(
            "search_users",
            "SearchUsers",
            "SearchUsersRequest",
            "SearchUsersResponse",
        ))
        .build();

    Builder::new().compile(&[service]);
    println!("cargo:rerun-if-changed=build.rs");
}
