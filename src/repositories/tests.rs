#[cfg(test)]
mod repository_tests {
    use crate::models::{
        CreatePromotionRequest, Promotion, RegisterProfileRequest, Review, ReviewTarget,
        SubmitReviewRequest, UserProfile,
    };
    use aws_sdk_dynamodb::types::AttributeValue;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    use crate::repositories::profile_repository::*;
    use crate::repositories::promotion_repository::*;
    use crate::repositories::review_repository::*;

    fn create_test_client() -> Arc<aws_sdk_dynamodb::Client> {
        let config = aws_sdk_dynamodb::Config::builder()
            .region(aws_sdk_dynamodb::config::Region::new("ap-southeast-1"))
            .behavior_version(aws_sdk_dynamodb::config::BehaviorVersion::latest())
            .build();
        Arc::new(aws_sdk_dynamodb::Client::from_conf(config))
    }

    fn create_test_review() -> Review {
        Review::new(
            "U001".to_string(),
            ReviewTarget::menu_item("M001"),
            SubmitReviewRequest {
                rating: dec!(4.5),
                text: "Best laksa in the centre".to_string(),
                image_ref: Some("reviews/laksa.jpg".to_string()),
            },
        )
    }

    fn create_test_promotion() -> Promotion {
        Promotion::new(CreatePromotionRequest {
            stall_ref: "S001".to_string(),
            title: "Opening Special".to_string(),
            description: "Half price kopi all week".to_string(),
            image_ref: None,
            start_date: NaiveDate::from_ymd_opt(2023, 7, 1).unwrap(),
            end_date: Some(NaiveDate::from_ymd_opt(2023, 7, 15).unwrap()),
        })
    }

    fn create_test_profile() -> UserProfile {
        let mut profile = UserProfile::new(RegisterProfileRequest {
            username: "makan_fan".to_string(),
            avatar_ref: Some("avatars/makan_fan.jpg".to_string()),
        });
        profile.dietary_restrictions.add("Fish").unwrap();
        profile.dietary_restrictions.add("Peanuts").unwrap();
        profile
    }

    mod review_repository_tests {
        use super::*;

        #[test]
        fn test_review_item_round_trip() {
            let review = create_test_review();
            let client = create_test_client();
            let repo = DynamoDbReviewRepository::new(client, "test-reviews".to_string());

            let item = repo.review_to_item(&review);

            assert!(item.contains_key("id"));
            assert!(item.contains_key("author_ref"));
            assert!(item.contains_key("target_kind"));
            assert!(item.contains_key("target_id"));
            assert!(item.contains_key("target_key"));
            assert!(item.contains_key("rating"));
            assert!(item.contains_key("text"));
            assert!(item.contains_key("image_ref"));
            assert!(item.contains_key("created_at"));
            assert!(item.contains_key("updated_at"));

            if let Some(AttributeValue::S(target_key)) = item.get("target_key") {
                assert_eq!(target_key, "menu_item#M001");
            } else {
                panic!("Expected string value for target_key");
            }

            if let Some(AttributeValue::N(rating)) = item.get("rating") {
                assert_eq!(rating, "4.5");
            } else {
                panic!("Expected number value for rating");
            }

            let parsed = repo.item_to_review(item).unwrap();
            assert_eq!(parsed, review);
        }

        #[test]
        fn test_review_item_without_image() {
            let mut review = create_test_review();
            review.image_ref = None;

            let repo = DynamoDbReviewRepository::new(create_test_client(), "t".to_string());
            let item = repo.review_to_item(&review);

            assert!(!item.contains_key("image_ref"));
            assert_eq!(repo.item_to_review(item).unwrap().image_ref, None);
        }

        #[test]
        fn test_malformed_review_item_rejected() {
            let repo = DynamoDbReviewRepository::new(create_test_client(), "t".to_string());

            let mut item = repo.review_to_item(&create_test_review());
            item.remove("rating");

            assert!(repo.item_to_review(item).is_err());
        }
    }

    mod promotion_repository_tests {
        use super::*;

        #[test]
        fn test_promotion_item_round_trip() {
            let promotion = create_test_promotion();
            let repo =
                DynamoDbPromotionRepository::new(create_test_client(), "test-promos".to_string());

            let item = repo.promotion_to_item(&promotion);

            if let Some(AttributeValue::S(start)) = item.get("start_date") {
                assert_eq!(start, "2023-07-01");
            } else {
                panic!("Expected string value for start_date");
            }

            let parsed = repo.item_to_promotion(item).unwrap();
            assert_eq!(parsed, promotion);
        }

        #[test]
        fn test_open_ended_promotion_omits_end_date() {
            let mut promotion = create_test_promotion();
            promotion.end_date = None;

            let repo = DynamoDbPromotionRepository::new(create_test_client(), "t".to_string());
            let item = repo.promotion_to_item(&promotion);

            assert!(!item.contains_key("end_date"));
            assert_eq!(repo.item_to_promotion(item).unwrap().end_date, None);
        }

        #[test]
        fn test_malformed_promotion_item_rejected() {
            let repo = DynamoDbPromotionRepository::new(create_test_client(), "t".to_string());

            let mut item = repo.promotion_to_item(&create_test_promotion());
            item.insert(
                "start_date".to_string(),
                AttributeValue::S("not-a-date".to_string()),
            );

            assert!(repo.item_to_promotion(item).is_err());
        }
    }

    mod profile_repository_tests {
        use super::*;

        #[test]
        fn test_profile_item_round_trip() {
            let profile = create_test_profile();
            let repo =
                DynamoDbProfileRepository::new(create_test_client(), "test-profiles".to_string());

            let item = repo.profile_to_item(&profile);

            if let Some(AttributeValue::L(restrictions)) = item.get("dietary_restrictions") {
                assert_eq!(restrictions.len(), 2);
                if let AttributeValue::S(first) = &restrictions[0] {
                    assert_eq!(first, "FISH");
                }
            } else {
                panic!("Expected list value for dietary_restrictions");
            }

            let parsed = repo.item_to_profile(item).unwrap();
            assert_eq!(parsed, profile);
        }

        #[test]
        fn test_profile_item_preserves_restriction_order() {
            let profile = create_test_profile();
            let repo = DynamoDbProfileRepository::new(create_test_client(), "t".to_string());

            let parsed = repo.item_to_profile(repo.profile_to_item(&profile)).unwrap();
            let tags: Vec<&str> = parsed
                .dietary_restrictions
                .iter()
                .map(|t| t.as_str())
                .collect();

            assert_eq!(tags, vec!["FISH", "PEANUTS"]);
        }

        #[test]
        fn test_malformed_profile_item_rejected() {
            let repo = DynamoDbProfileRepository::new(create_test_client(), "t".to_string());

            let mut item = repo.profile_to_item(&create_test_profile());
            item.remove("username");

            assert!(repo.item_to_profile(item).is_err());
        }
    }
}
