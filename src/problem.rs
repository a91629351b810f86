//! Problem definition and data structures for the coverage problems.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A candidate facility site that is also a demand point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    /// Cost of opening a facility here.
    pub weight: u64,
    /// Ids within the coverage radius, normally including `id` itself.
    pub points_within_radius: Vec<usize>,
}

impl Point {
    /// Create a new point.
    pub fn new(id: usize, x: f64, y: f64, weight: u64, points_within_radius: Vec<usize>) -> Self {
        Point {
            id,
            x,
            y,
            weight,
            points_within_radius,
        }
    }

    /// Calculate the Euclidean distance between two points.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A problem instance as written by the point-cloud generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemInstance {
    pub radius: f64,
    #[serde(rename = "maximumFacilities", alias = "max_facilities")]
    pub max_facilities: usize,
    pub total_points: usize,
    pub points_data: Vec<Point>,
}

impl ProblemInstance {
    /// Create an instance, deriving `total_points` from the point list.
    pub fn new(radius: f64, max_facilities: usize, points_data: Vec<Point>) -> Self {
        ProblemInstance {
            radius,
            max_facilities,
            total_points: points_data.len(),
            points_data,
        }
    }

    /// Build an instance whose coverage lists are computed from the coordinates.
    pub fn from_coordinates(radius: f64, max_facilities: usize, sites: &[(f64, f64, u64)]) -> Self {
        let mut points: Vec<Point> = sites
            .iter()
            .enumerate()
            .map(|(id, &(x, y, weight))| Point::new(id, x, y, weight, Vec::new()))
            .collect();

        for i in 0..points.len() {
            let within = points
                .iter()
                .filter(|other| points[i].distance(other) <= radius)
                .map(|other| other.id)
                .collect();
            points[i].points_within_radius = within;
        }

        ProblemInstance::new(radius, max_facilities, points)
    }

    /// Number of points in the instance.
    pub fn len(&self) -> usize {
        self.points_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points_data.is_empty()
    }

    /// Parse and validate an instance from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let problem: ProblemInstance = serde_json::from_str(json)?;
        problem.validate()?;
        Ok(problem)
    }

    /// Load and validate an instance from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let problem: ProblemInstance = serde_json::from_reader(BufReader::new(file))?;
        problem.validate()?;
        Ok(problem)
    }

    /// Check the structural invariants every engine relies on.
    pub fn validate(&self) -> Result<()> {
        let n = self.points_data.len();

        if self.total_points != n {
            return Err(Error::InvalidInstance(format!(
                "total_points is {} but points_data holds {} points",
                self.total_points, n
            )));
        }

        for (index, point) in self.points_data.iter().enumerate() {
            if point.id != index {
                return Err(Error::InvalidInstance(format!(
                    "point at position {} has id {}, ids must be dense and ordered",
                    index, point.id
                )));
            }
            if point.weight == 0 {
                return Err(Error::InvalidInstance(format!(
                    "point {} has non-positive weight",
                    point.id
                )));
            }
            if let Some(&missing) = point.points_within_radius.iter().find(|&&id| id >= n) {
                return Err(Error::InvalidInstance(format!(
                    "point {} references non-existent point {}",
                    point.id, missing
                )));
            }
        }

        Ok(())
    }
}
