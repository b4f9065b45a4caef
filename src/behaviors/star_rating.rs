//! Star rating input.
//!
//! Each `.star-rating` container holds `.star` icons and a hidden input that
//! carries the committed value on form submission. Clicking commits a rating
//! and switches icons between solid and outline. Hovering previews a rating
//! by color only; leaving the container restores colors from the hidden
//! input.

#[cfg(test)]
#[path = "star_rating_test.rs"]
mod star_rating_test;

use crate::consts::{STAR_ACTIVE_COLOR, STAR_IDLE_COLOR, STAR_OUTLINE_CLASS, STAR_SOLID_CLASS};
use crate::dom::Document;

pub const STAR_SELECTOR: &str = ".star";
pub const VALUE_INPUT_SELECTOR: &str = "input[type=\"hidden\"]";

/// Parse a committed rating the way form values are read back: leading
/// whitespace and an optional sign, then the longest digit prefix. Anything
/// unparseable, negative, or missing reads as 0.
#[must_use]
pub fn parse_rating(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 0;
    };
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    let Some(prefix) = digits.get(..end).filter(|p| !p.is_empty()) else {
        return 0;
    };
    if negative {
        return 0;
    }
    prefix.parse::<u32>().unwrap_or(u32::MAX)
}

/// Color of star `index` while previewing a hover on star `hovered`.
#[must_use]
pub fn preview_color(index: usize, hovered: usize) -> &'static str {
    if index <= hovered { STAR_ACTIVE_COLOR } else { STAR_IDLE_COLOR }
}

/// Color of star `index` for a committed `rating`.
#[must_use]
pub fn committed_color(index: usize, rating: u32) -> &'static str {
    if star_is_filled(index, rating) { STAR_ACTIVE_COLOR } else { STAR_IDLE_COLOR }
}

fn star_is_filled(index: usize, rating: u32) -> bool {
    u32::try_from(index).is_ok_and(|index| index < rating)
}

/// One widget instance.
#[derive(Debug, Clone)]
pub struct StarRating<N> {
    container: N,
    stars: Vec<N>,
    input: Option<N>,
    rating: u32,
}

impl<N: Clone> StarRating<N> {
    /// Collect the stars and hidden input inside `container`.
    pub fn discover<D: Document<Node = N>>(doc: &D, container: N) -> Self {
        let stars = doc.query_within(&container, STAR_SELECTOR);
        let input = doc.query_within(&container, VALUE_INPUT_SELECTOR).into_iter().next();
        let rating = parse_rating(input.as_ref().and_then(|input| doc.value(input)).as_deref());
        Self { container, stars, input, rating }
    }

    #[must_use]
    pub fn container(&self) -> &N {
        &self.container
    }

    #[must_use]
    pub fn stars(&self) -> &[N] {
        &self.stars
    }

    /// The rating committed by the last click in this session.
    #[must_use]
    pub fn rating(&self) -> u32 {
        self.rating
    }

    /// The rating currently stored in the hidden input.
    pub fn stored_rating<D: Document<Node = N>>(&self, doc: &D) -> u32 {
        parse_rating(self.input.as_ref().and_then(|input| doc.value(input)).as_deref())
    }

    /// Commit star `index` (0-based) as the rating.
    pub fn click<D: Document<Node = N>>(&mut self, doc: &D, index: usize) {
        if index >= self.stars.len() {
            return;
        }
        self.rating = u32::try_from(index + 1).unwrap_or(u32::MAX);
        if let Some(input) = &self.input {
            doc.set_value(input, &self.rating.to_string());
        }
        for (i, star) in self.stars.iter().enumerate() {
            if star_is_filled(i, self.rating) {
                doc.remove_class(star, STAR_OUTLINE_CLASS);
                doc.add_class(star, STAR_SOLID_CLASS);
            } else {
                doc.remove_class(star, STAR_SOLID_CLASS);
                doc.add_class(star, STAR_OUTLINE_CLASS);
            }
        }
    }

    /// Preview a rating up to and including star `index`.
    pub fn hover<D: Document<Node = N>>(&self, doc: &D, index: usize) {
        for (i, star) in self.stars.iter().enumerate() {
            doc.set_style(star, "color", preview_color(i, index));
        }
    }

    /// Restore colors from the hidden input.
    pub fn leave<D: Document<Node = N>>(&self, doc: &D) {
        let rating = self.stored_rating(doc);
        for (i, star) in self.stars.iter().enumerate() {
            doc.set_style(star, "color", committed_color(i, rating));
        }
    }
}
