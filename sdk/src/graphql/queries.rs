pub const GET_USERS: &str = r#"
query GetUsers($skip: Int, $limit: Int) {
    users(skip: $skip, limit: $limit) {
        id
        name
        email
    }
}
"#;

pub const GET_USER: &str = r#"
query GetUser($userId: Int!) {
    user(userId: $userId) {
        id
        name
        email
    }
}
"#;

pub const SEARCH_USERS: &str = r#"
query SearchUsers($query: String!) {
    searchUsers(query: $query) {
        id
        name
        email
    }
}
"#;

pub const CREATE_USER: &str = r#"
mutation CreateUser($userData: UserInput!) {
    createUser(userData: $userData) {
        user {
            id
            name
            email
        }
        success
    }
}
"#;

pub const UPDATE_USER: &str = r#"
mutation UpdateUser($userId: Int!, $userData: UserUpdateInput!) {
    updateUser(userId: $userId, userData: $userData) {
        user {
            id
            name
            email
        }
        success
    }
}
"#;

pub const DELETE_USER: &str = r#"
mutation DeleteUser($userId: Int!) {
    deleteUser(userId: $userId) {
        success
        message
    }
}
"#;
