//! Unit tests for instance loading and validation.

use coverage_ga::error::Error;
use coverage_ga::problem::{Point, ProblemInstance};
use serde_json::json;

fn instance_json() -> serde_json::Value {
    json!({
        "radius": 15.0,
        "maximumFacilities": 2,
        "total_points": 3,
        "points_data": [
            {"id": 0, "x": 0.0, "y": 0.0, "weight": 1, "points_within_radius": [0, 1]},
            {"id": 1, "x": 10.0, "y": 0.0, "weight": 2, "points_within_radius": [0, 1, 2]},
            {"id": 2, "x": 20.0, "y": 0.0, "weight": 3, "points_within_radius": [1, 2]}
        ]
    })
}

#[test]
fn test_parse_generator_record() {
    let problem = ProblemInstance::from_json_str(&instance_json().to_string()).unwrap();

    assert_eq!(problem.radius, 15.0);
    assert_eq!(problem.max_facilities, 2);
    assert_eq!(problem.total_points, 3);
    assert_eq!(problem.len(), 3);
    assert_eq!(problem.points_data[1].points_within_radius, vec![0, 1, 2]);
    assert_eq!(problem.points_data[2].weight, 3);
}

#[test]
fn test_parse_accepts_snake_case_facility_field() {
    let mut value = instance_json();
    let max = value.as_object_mut().unwrap().remove("maximumFacilities").unwrap();
    value["max_facilities"] = max;

    let problem = ProblemInstance::from_json_str(&value.to_string()).unwrap();
    assert_eq!(problem.max_facilities, 2);
}

#[test]
fn test_missing_field_is_json_error() {
    let mut value = instance_json();
    value.as_object_mut().unwrap().remove("points_data");

    let result = ProblemInstance::from_json_str(&value.to_string());
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn test_negative_weight_is_rejected() {
    let mut value = instance_json();
    value["points_data"][0]["weight"] = json!(-1);

    assert!(ProblemInstance::from_json_str(&value.to_string()).is_err());
}

#[test]
fn test_zero_weight_is_rejected() {
    let mut value = instance_json();
    value["points_data"][0]["weight"] = json!(0);

    let result = ProblemInstance::from_json_str(&value.to_string());
    assert!(matches!(result, Err(Error::InvalidInstance(_))));
}

#[test]
fn test_non_dense_ids_are_rejected() {
    let mut value = instance_json();
    value["points_data"][2]["id"] = json!(7);

    let result = ProblemInstance::from_json_str(&value.to_string());
    assert!(matches!(result, Err(Error::InvalidInstance(_))));
}

#[test]
fn test_dangling_reference_is_rejected() {
    let mut value = instance_json();
    value["points_data"][0]["points_within_radius"] = json!([0, 3]);

    let result = ProblemInstance::from_json_str(&value.to_string());
    assert!(matches!(result, Err(Error::InvalidInstance(_))));
}

#[test]
fn test_total_points_mismatch_is_rejected() {
    let mut value = instance_json();
    value["total_points"] = json!(4);

    let result = ProblemInstance::from_json_str(&value.to_string());
    assert!(matches!(result, Err(Error::InvalidInstance(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = ProblemInstance::from_file("does/not/exist.json");
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_from_coordinates_includes_self() {
    let problem = ProblemInstance::from_coordinates(
        10.0,
        1,
        &[(0.0, 0.0, 1), (5.0, 0.0, 1), (30.0, 0.0, 2)],
    );

    assert_eq!(problem.total_points, 3);
    assert_eq!(problem.points_data[0].points_within_radius, vec![0, 1]);
    assert_eq!(problem.points_data[1].points_within_radius, vec![0, 1]);
    assert_eq!(problem.points_data[2].points_within_radius, vec![2]);
    assert!(problem.validate().is_ok());
}

#[test]
fn test_point_distance() {
    let a = Point::new(0, 0.0, 0.0, 1, vec![0]);
    let b = Point::new(1, 3.0, 4.0, 1, vec![1]);
    assert_eq!(a.distance(&b), 5.0);
    assert_eq!(b.distance(&a), 5.0);
}
