use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use users_sdk::models::user::{User, UserId, UserUpdate};

pub type SharedStore = Arc<RwLock<UserStore>>;

pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// In-memory user store owned by a single server process.
///
/// IDs are assigned sequentially, starting after the highest seeded ID.
#[derive(Debug)]
pub struct UserStore {
    users: BTreeMap<UserId, User>,
    next_id: UserId,
}

impl UserStore {
    pub fn new(seed: Vec<User>) -> Self {
        let users: BTreeMap<UserId, User> = seed.into_iter().map(|user| (user.id, user)).collect();
        let next_id = users.keys().next_back().map_or(1, |id| id + 1);
        Self { users, next_id }
    }

    pub fn shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn list(&self, skip: usize, limit: usize) -> Vec<User> {
        self.users.values().skip(skip).take(limit).cloned().collect()
    }

    pub fn get(&self, user_id: UserId) -> Option<User> {
        self.users.get(&user_id).cloned()
    }

    pub fn create(&mut self, name: &str, email: &str) -> User {
        let user = User::new(self.next_id, name, email);
        self.next_id += 1;
        self.users.insert(user.id, user.clone());
        debug!("Created user with ID: {}", user.id);
        user
    }

    /// Empty strings are treated as absent fields.
    pub fn update(&mut self, user_id: UserId, update: &UserUpdate) -> Option<User> {
        let user = self.users.get_mut(&user_id)?;
        if let Some(name) = update.name.as_deref().filter(|name| !name.is_empty()) {
            user.name = name.to_string();
        }
        if let Some(email) = update.email.as_deref().filter(|email| !email.is_empty()) {
            user.email = email.to_string();
        }
        Some(user.clone())
    }

    pub fn delete(&mut self, user_id: UserId) -> bool {
        let deleted = self.users.remove(&user_id).is_some();
        if deleted {
            debug!("Deleted user with ID: {user_id}");
        }
        deleted
    }

    pub fn search(&self, query: &str) -> Vec<User> {
        self.users
            .values()
            .filter(|user| user.matches(query))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> UserStore {
        UserStore::new(vec![
            User::new(1, "Nguyễn Văn An", "an.nguyen@gmail.com"),
            User::new(2, "Trần Thị Bình", "binh.tran@example.com"),
            User::new(5, "Lê Hoàng Cường", "cuong.le@gmail.com"),
        ])
    }

    #[test]
    fn created_user_should_get_next_id_after_seed() {
        let mut store = seeded();
        let user = store.create("Ann", "ann@x.com");
        assert_eq!(user.id, 6);
        assert_eq!(store.get(6), Some(user));
        assert_eq!(store.create("Bob", "bob@x.com").id, 7);
    }

    #[test]
    fn empty_store_should_start_ids_at_one() {
        let mut store = UserStore::new(Vec::new());
        assert_eq!(store.create("Ann", "ann@x.com").id, 1);
        assert_eq!(store.create("Bob", "bob@x.com").id, 2);
    }

    #[test]
    fn list_should_page_in_id_order() {
        let store = seeded();
        let ids: Vec<UserId> = store.list(1, 5).iter().map(|user| user.id).collect();
        assert_eq!(ids, vec![2, 5]);
        assert!(store.list(10, 5).is_empty());
    }

    #[test]
    fn update_should_ignore_absent_and_empty_fields() {
        let mut store = seeded();
        let updated = store
            .update(
                2,
                &UserUpdate {
                    name: Some("Trần Thị Bích".to_string()),
                    email: Some(String::new()),
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Trần Thị Bích");
        assert_eq!(updated.email, "binh.tran@example.com");
        assert!(store.update(99, &UserUpdate::default()).is_none());
    }

    #[test]
    fn delete_should_report_whether_user_existed() {
        let mut store = seeded();
        assert!(store.delete(1));
        assert!(!store.delete(1));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn search_should_match_name_or_email() {
        let store = seeded();
        let ids: Vec<UserId> = store.search("GMAIL").iter().map(|user| user.id).collect();
        assert_eq!(ids, vec![1, 5]);
        assert_eq!(store.search("trần").len(), 1);
    }
}
