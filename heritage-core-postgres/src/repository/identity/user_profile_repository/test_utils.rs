#[cfg(test)]
pub mod test_utils {
    use chrono::Utc;
    use heritage_core_db::models::identity::user_profile::UserProfileModel;
    use uuid::Uuid;

    pub fn create_test_profile(user_id: Uuid, rank: i32) -> UserProfileModel {
        UserProfileModel {
            user_id,
            bio: None,
            profile_photo_url: None,
            rank,
            created_at: Utc::now(),
        }
    }
}
