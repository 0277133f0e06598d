#[cfg(test)]
pub mod test_utils {
    use chrono::Utc;
    use heapless::String as HeaplessString;
    use heritage_core_db::models::identity::app_user::AppUserModel;
    use uuid::Uuid;

    pub fn create_test_user(username: &str, is_staff: bool) -> AppUserModel {
        AppUserModel {
            id: Uuid::new_v4(),
            username: HeaplessString::try_from(username).unwrap(),
            email: None,
            is_staff,
            is_superuser: false,
            date_joined: Utc::now(),
        }
    }
}
