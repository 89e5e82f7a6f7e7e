use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

/// One line of text as reported by a recognizer pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Corners in reading order, starting at the top-left.
    pub bounding_box: [Point; 4],
    pub text: String,
    pub confidence: f64,
}

impl LineRecord {
    pub fn new(bounding_box: [Point; 4], text: impl Into<String>, confidence: f64) -> Self {
        Self {
            bounding_box,
            text: text.into(),
            confidence,
        }
    }

    /// Axis-aligned box with its top-left corner at `(x, y)`.
    pub fn at(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        text: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self::new(
            [
                Point::new(x, y),
                Point::new(x + width, y),
                Point::new(x + width, y + height),
                Point::new(x, y + height),
            ],
            text,
            confidence,
        )
    }

    /// Vertical position used for reading order.
    pub fn top(&self) -> f64 {
        self.bounding_box[0].y
    }
}

#[cfg(test)]
mod tests {
    use super::LineRecord;

    #[test]
    fn top_uses_first_corner() {
        let line = LineRecord::at(10.0, 42.5, 100.0, 20.0, "Ada", 0.9);
        assert_eq!(line.top(), 42.5);
    }

    #[test]
    fn bounding_box_serializes_as_coordinate_pairs() {
        let line = LineRecord::at(0.0, 30.0, 100.0, 20.0, "212-555-1234", 0.8);
        let value = serde_json::to_value(&line).expect("serialize");
        assert_eq!(value["bounding_box"][0], serde_json::json!([0.0, 30.0]));
        assert_eq!(value["bounding_box"][2], serde_json::json!([100.0, 50.0]));
    }
}
