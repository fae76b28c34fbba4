//! Strength indicator - turns a category into a level and paints the bar.

use crate::classifier::StrengthCategory;

/// Attribute carrying the numeric level for assistive technology.
pub const VALUE_ATTRIBUTE: &str = "aria-valuenow";

/// Rendering port for the strength bar element.
pub trait StrengthBar {
    fn set_attribute(&mut self, name: &str, value: &str);
    fn set_width(&mut self, width: &str);
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
    fn set_text(&mut self, text: &str);
}

/// Color tier of the bar. Exactly one tier class is present after rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Danger,
    Warning,
    Info,
    Success,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Danger, Tier::Warning, Tier::Info, Tier::Success];

    pub fn class(self) -> &'static str {
        match self {
            Tier::Danger => "bg-danger",
            Tier::Warning => "bg-warning",
            Tier::Info => "bg-info",
            Tier::Success => "bg-success",
        }
    }
}

/// Level shown for a category.
pub fn level_for(category: StrengthCategory) -> u8 {
    match category {
        StrengthCategory::None => 0,
        StrengthCategory::Weak => 25,
        StrengthCategory::Moderate => 50,
        StrengthCategory::Strong => 75,
        StrengthCategory::VeryStrong => 100,
    }
}

/// Tier and label for a level. Anything off the scale renders as empty.
pub fn presentation(level: u8) -> (Tier, &'static str) {
    match level {
        25 => (Tier::Danger, "Weak"),
        50 => (Tier::Warning, "Moderate"),
        75 => (Tier::Info, "Strong"),
        100 => (Tier::Success, "Very Strong"),
        _ => (Tier::Danger, ""),
    }
}

/// Paints `level` onto the bar and returns the level actually shown.
pub fn apply_indicator<B: StrengthBar + ?Sized>(bar: &mut B, level: u8) -> u8 {
    let (tier, label) = presentation(level);
    let shown = if label.is_empty() { 0 } else { level };

    bar.set_attribute(VALUE_ATTRIBUTE, &shown.to_string());
    if shown == 0 {
        bar.set_width("0");
    } else {
        bar.set_width(&format!("{shown}%"));
    }

    for t in Tier::ALL {
        bar.remove_class(t.class());
    }
    bar.add_class(tier.class());
    bar.set_text(label);

    shown
}
