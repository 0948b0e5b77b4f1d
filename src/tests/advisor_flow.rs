use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::adapter::output::{
    InMemoryVectorIndex, JsonFoodStore, JsonRequirementsStore, SimpleEmbeddingService,
};
use crate::application::{DietaryRequirementsService, IndexingService, NutritionLookupService};
use crate::domain::nutrients::{DISPLAY_NUTRIENT_CAP, DOCUMENT_NUTRIENT_CAP};
use crate::domain::{AdvisorError, DietaryDatasets, DietaryQuery, FoodRecord, ResultLimits};
use crate::ports::in_ports::{DietaryRequirementsPort, IndexingPort, NutritionLookupPort};

fn food_records() -> Vec<FoodRecord> {
    [
        json!({
            "fdcId": 321358,
            "description": "Hummus, commercial",
            "foodClass": "FinalFood",
            "foodCategory": {"description": "Legumes and Legume Products"},
            "foodNutrients": [
                {"nutrient": {"name": "Energy", "unitName": "kcal"}, "amount": 166},
                {"nutrient": {"name": "Protein", "unitName": "g"}, "amount": 7.9},
                {"nutrient": {"name": "Cryptoxanthin beta", "unitName": "µg"}, "amount": 3.0}
            ]
        }),
        json!({
            "fdcId": 747447,
            "description": "Broccoli, raw",
            "foodClass": "FinalFood",
            "foodCategory": {"description": "Vegetables and Vegetable Products"},
            "foodNutrients": [
                {"nutrient": {"name": "Vitamin C, total ascorbic acid", "unitName": "mg"}, "amount": 89.2},
                {"nutrient": {"name": "Energy", "unitName": "kcal"}, "amount": 34}
            ]
        }),
        json!({"description": "Mystery item without an id"}),
    ]
    .into_iter()
    .map(|value| FoodRecord::from_value(value).unwrap())
    .collect()
}

fn table(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn dietary_datasets() -> DietaryDatasets {
    DietaryDatasets {
        minerals: table(json!({
            "19-64": {
                "male": {"iron_mg": 8.7, "calcium_mg": 700},
                "female": {"iron_mg": 14.8, "calcium_mg": 700}
            }
        })),
        vitamins: table(json!({
            "19-64": {"female": {"vitamin_d_ug": 10}}
        })),
        nutrition: table(json!({
            "19-64": {"female": {"energy_kcal": 2000}}
        })),
    }
}

struct Advisor {
    indexing: IndexingService,
    nutrition: NutritionLookupService,
    dietary: DietaryRequirementsService,
}

fn create_advisor() -> Advisor {
    let embedding_service = Arc::new(SimpleEmbeddingService::new(4096));
    let food_index = Arc::new(InMemoryVectorIndex::new(embedding_service.clone()));
    let dietary_index = Arc::new(InMemoryVectorIndex::new(embedding_service));

    Advisor {
        indexing: IndexingService::new(
            food_index.clone(),
            dietary_index.clone(),
            DOCUMENT_NUTRIENT_CAP,
        ),
        nutrition: NutritionLookupService::new(
            food_index,
            Arc::new(JsonFoodStore::from_records(food_records())),
            ResultLimits::NUTRITION,
            DOCUMENT_NUTRIENT_CAP,
            DISPLAY_NUTRIENT_CAP,
        ),
        dietary: DietaryRequirementsService::new(
            dietary_index,
            Arc::new(JsonRequirementsStore::from_datasets(dietary_datasets())),
            ResultLimits::DIETARY,
        ),
    }
}

#[tokio::test]
async fn test_index_then_lookup_food() {
    let advisor = create_advisor();

    let report = advisor
        .indexing
        .index_foods(&food_records(), false)
        .await
        .expect("Failed to index foods");
    assert_eq!(report.indexed, 2);
    assert_eq!(report.total, 2);

    // A second run keeps what is there
    let report = advisor.indexing.index_foods(&food_records(), false).await.unwrap();
    assert!(report.skipped);
    assert_eq!(report.total, 2);

    let response = advisor
        .nutrition
        .lookup("hummus".to_string(), Some(1))
        .await
        .expect("Failed to look up food");
    assert_eq!(
        response,
        "Found 1 result(s) for 'hummus':\n\n\
         1. Hummus, commercial\n   \
         Category: Legumes and Legume Products\n   \
         Key Nutrients: Calories: 166 kcal, Protein: 7.9 g, Cryptoxanthin beta: 3.0 µg"
    );

    let summary = advisor
        .nutrition
        .food_summary("747447".to_string())
        .await
        .unwrap()
        .expect("Broccoli should be stored");
    assert_eq!(summary.category, "Vegetables and Vegetable Products");
    assert!(summary
        .document
        .ends_with("Nutrients: Energy: 34 kcal, Vitamin C, total ascorbic acid: 89.2 mg"));
    assert_eq!(summary.key_nutrients[1].name, "Vitamin C");

    assert!(advisor
        .nutrition
        .food_summary("999".to_string())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_lookup_before_indexing_is_empty() {
    let advisor = create_advisor();

    let response = advisor
        .nutrition
        .lookup("hummus".to_string(), None)
        .await
        .unwrap();
    assert_eq!(
        response,
        "No nutritional information found for 'hummus'. Try a different search term."
    );
}

#[tokio::test]
async fn test_reindex_replaces_documents() {
    let advisor = create_advisor();
    advisor.indexing.index_foods(&food_records(), false).await.unwrap();

    let report = advisor
        .indexing
        .index_foods(&food_records()[..1], true)
        .await
        .unwrap();
    assert!(!report.skipped);
    assert_eq!(report.total, 1);
}

#[tokio::test]
async fn test_dietary_exact_match_and_search() {
    let advisor = create_advisor();

    let report = advisor
        .indexing
        .index_dietary(&dietary_datasets(), false)
        .await
        .expect("Failed to index dietary tables");
    assert_eq!(report.indexed, 2);

    let stats = advisor.indexing.stats().await.unwrap();
    assert_eq!(stats.dietary, 2);
    assert_eq!(stats.foods, 0);

    let report = advisor
        .dietary
        .lookup(DietaryQuery {
            query: "How much iron does a 30-year-old woman need?".to_string(),
            ..DietaryQuery::default()
        })
        .await
        .unwrap();
    assert!(report.starts_with("Dietary Requirements for Female, Age 30 (Age Group: 19-64)\n"));
    assert!(report.contains("  - Iron Mg: 14.8 mg"));
    assert!(report.contains("  - Energy Kcal: 2000 kcal"));

    let response = advisor
        .dietary
        .lookup(DietaryQuery {
            query: "calcium".to_string(),
            ..DietaryQuery::default()
        })
        .await
        .unwrap();
    assert!(response.starts_with("Found 2 result(s) for 'calcium':\n\n"));
    assert!(response.contains("Key Minerals: Iron Mg, Calcium Mg"));

    let err = advisor
        .dietary
        .lookup(DietaryQuery {
            query: "calcium".to_string(),
            age: Some(0),
            ..DietaryQuery::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AdvisorError::OutOfRangeAge(0)));
}
