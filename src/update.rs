/// Outcome of a recompute step for a displayed value.
///
/// `Unchanged` means "keep whatever is currently shown", which is different
/// from setting an empty value.
#[derive(Debug, Clone, PartialEq)]
pub enum Update<T> {
    Set(T),
    Unchanged,
}

impl<T> Update<T> {
    /// Write the new value into `slot`, or leave it alone.
    pub fn apply_to(self, slot: &mut T) {
        if let Update::Set(value) = self {
            *slot = value;
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Update::Set(value) => Some(value),
            Update::Unchanged => None,
        }
    }
}
