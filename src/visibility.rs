//! Masked/clear-text toggle for a password pair.

pub const ICON_CLEAR: &str = "bi-eye";
pub const ICON_MASKED: &str = "bi-eye-slash";

/// Port for an input whose `type` attribute decides masking.
pub trait MaskableField {
    fn input_type(&self) -> Option<&str>;
    fn set_input_type(&mut self, input_type: &str);
}

/// Port for the icon on the toggle button.
pub trait ToggleIcon {
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Masked,
    Clear,
}

impl Visibility {
    /// Only an explicit `type="text"` counts as clear text.
    pub fn of<F: MaskableField + ?Sized>(field: &F) -> Self {
        match field.input_type() {
            Some("text") => Visibility::Clear,
            _ => Visibility::Masked,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Visibility::Masked => Visibility::Clear,
            Visibility::Clear => Visibility::Masked,
        }
    }

    pub fn input_type(self) -> &'static str {
        match self {
            Visibility::Masked => "password",
            Visibility::Clear => "text",
        }
    }

    pub fn apply_to_field<F: MaskableField + ?Sized>(self, field: &mut F) {
        field.set_input_type(self.input_type());
    }

    pub fn apply_to_icon<I: ToggleIcon + ?Sized>(self, icon: &mut I) {
        let (old, new) = match self {
            Visibility::Masked => (ICON_CLEAR, ICON_MASKED),
            Visibility::Clear => (ICON_MASKED, ICON_CLEAR),
        };
        icon.remove_class(old);
        icon.add_class(new);
    }
}

/// Flips the pair to the opposite mode of the password field and returns the
/// new mode. Both fields always end up in the same mode.
pub fn toggle_visibility<F, I>(
    password: &mut F,
    confirm: Option<&mut F>,
    icon: Option<&mut I>,
) -> Visibility
where
    F: MaskableField + ?Sized,
    I: ToggleIcon + ?Sized,
{
    let next = Visibility::of(password).toggled();
    next.apply_to_field(password);
    if let Some(confirm) = confirm {
        next.apply_to_field(confirm);
    }
    if let Some(icon) = icon {
        next.apply_to_icon(icon);
    }
    next
}
