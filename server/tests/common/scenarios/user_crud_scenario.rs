use crate::common::ClientFactory;

const NAME: &str = "Ann";
const EMAIL: &str = "ann@x.com";
const UPDATED_NAME: &str = "Ann Lê";

pub async fn run(client_factory: &dyn ClientFactory) {
    let client = client_factory.create_client().await;

    // 1. Seeded users are listed in ID order
    let users = client.get_users(0, 10).await.unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(users[0].id, 1);
    assert_eq!(users[0].name, "Nguyễn Văn An");
    let page = client.get_users(1, 1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, 2);

    // 2. Create the user and fetch it back
    let created = client.create_user(NAME, EMAIL).await.unwrap();
    assert_eq!(created.name, NAME);
    assert_eq!(created.email, EMAIL);
    let fetched = client.get_user(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, NAME);
    assert_eq!(fetched.email, EMAIL);

    // 3. Reading the same user twice gives the same answer
    let fetched_again = client.get_user(created.id).await.unwrap();
    assert_eq!(fetched_again, Some(fetched));

    // 4. Update only the name
    let updated = client
        .update_user(created.id, Some(UPDATED_NAME), None)
        .await
        .unwrap();
    assert_eq!(updated.name, UPDATED_NAME);
    assert_eq!(updated.email, EMAIL);

    // 5. Search by name, email and a seeded surname
    let found = client.search_users("ann lê").await.unwrap();
    assert!(found.iter().any(|user| user.id == created.id));
    let found = client.search_users("x.com").await.unwrap();
    assert_eq!(found.len(), 1);
    let found = client.search_users("gmail").await.unwrap();
    assert_eq!(found.len(), 2);
    let found = client.search_users("Trần").await.unwrap();
    assert_eq!(found.len(), 1);

    // 6. Delete the user, a second delete reports a missing user
    assert!(client.delete_user(created.id).await.unwrap());
    assert!(client.get_user(created.id).await.unwrap().is_none());
    assert!(!client.delete_user(created.id).await.unwrap());

    // 7. Updating a missing user fails
    assert!(client
        .update_user(created.id, Some(UPDATED_NAME), None)
        .await
        .is_err());

    client.disconnect().await.unwrap();
}
