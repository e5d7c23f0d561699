//! Form input value objects

/// Kind of a named input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Number,
    Tel,
    Radio,
    Checkbox,
}

impl InputKind {
    /// Radio and checkbox inputs carry a fixed value and a checked flag
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Radio | Self::Checkbox)
    }
}

/// A single named input, the terminal counterpart of an `<input>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub label: String,
    pub kind: InputKind,
    /// Typed text for free inputs, the option value for choices
    pub value: String,
    pub checked: bool,
}

impl FormInput {
    fn new(name: &str, label: &str, kind: InputKind, value: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            value: value.to_string(),
            checked: false,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, InputKind::Text, "")
    }

    pub fn email(name: &str, label: &str) -> Self {
        Self::new(name, label, InputKind::Email, "")
    }

    pub fn number(name: &str, label: &str) -> Self {
        Self::new(name, label, InputKind::Number, "")
    }

    pub fn tel(name: &str, label: &str) -> Self {
        Self::new(name, label, InputKind::Tel, "")
    }

    pub fn radio(name: &str, value: &str, label: &str) -> Self {
        Self::new(name, label, InputKind::Radio, value)
    }

    pub fn checkbox(name: &str, value: &str, label: &str) -> Self {
        Self::new(name, label, InputKind::Checkbox, value)
    }

    /// Push a character to a free-text value
    pub fn push_char(&mut self, c: char) -> bool {
        match self.kind {
            InputKind::Number if !c.is_ascii_digit() => false,
            InputKind::Text | InputKind::Email | InputKind::Number => {
                self.value.push(c);
                true
            }
            _ => false,
        }
    }

    /// Remove the last character from a free-text value
    pub fn pop_char(&mut self) -> bool {
        match self.kind {
            InputKind::Text | InputKind::Email | InputKind::Number => self.value.pop().is_some(),
            _ => false,
        }
    }

    /// True for the chip that excludes every other option in its group
    pub fn is_none_option(&self) -> bool {
        self.kind == InputKind::Checkbox && self.label.trim().eq_ignore_ascii_case("none")
    }
}
