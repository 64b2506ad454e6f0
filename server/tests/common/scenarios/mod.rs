pub mod user_crud_scenario;
