//! Scene characters
//!
//! A character is a named sprite with a set of expression images and a
//! screen position. Positions change through Move commands; expressions
//! through Dialog commands.

use crate::assets::ImageData;
use crate::foundation::math::Vec2;
use std::collections::HashMap;

/// One on-screen character
pub struct Character {
    name: String,
    position: Vec2,
    expressions: HashMap<String, ImageData>,
    current: Option<String>,
}

impl Character {
    /// Create a character with no expressions at the origin
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            position: Vec2::new(0.0, 0.0),
            expressions: HashMap::new(),
            current: None,
        }
    }

    /// Add an expression image
    ///
    /// The first expression added becomes the current one.
    pub fn add_expression<S: Into<String>>(&mut self, expression: S, image: ImageData) {
        let expression = expression.into();
        let first = self.expressions.is_empty();
        self.expressions.insert(expression.clone(), image);
        if first {
            self.current = Some(expression);
        }
    }

    /// Switch to a named expression; unknown names are ignored
    pub fn set_expression(&mut self, expression: &str) {
        if self.expressions.contains_key(expression) {
            self.current = Some(expression.to_string());
        } else {
            log::debug!(
                "Character '{}' has no expression '{}'",
                self.name,
                expression
            );
        }
    }

    /// Move the character
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Identity key referenced by script commands
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current screen position in pixels
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Name of the current expression, if any
    pub fn current_expression(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Sprite image for the current expression
    pub fn sprite(&self) -> Option<&ImageData> {
        self.current.as_ref().and_then(|name| self.expressions.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ImageData {
        ImageData::solid_color(2, 2, [255, 255, 255, 255])
    }

    #[test]
    fn test_first_expression_becomes_current() {
        let mut ch = Character::new("Mira");
        assert!(ch.sprite().is_none());

        ch.add_expression("smile", image());
        ch.add_expression("frown", image());
        assert_eq!(ch.current_expression(), Some("smile"));
    }

    #[test]
    fn test_unknown_expression_ignored() {
        let mut ch = Character::new("Mira");
        ch.add_expression("default", image());
        ch.set_expression("nonexistent");
        assert_eq!(ch.current_expression(), Some("default"));
    }

    #[test]
    fn test_set_position() {
        let mut ch = Character::new("Mira");
        ch.set_position(Vec2::new(320.0, 540.0));
        assert_eq!(ch.position(), Vec2::new(320.0, 540.0));
    }
}
