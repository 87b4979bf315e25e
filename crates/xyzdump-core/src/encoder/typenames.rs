use super::error::EncoderError;

/// Registry mapping integer species codes to display names.
///
/// Codes run from 1 to the number of declared species, fixed when the
/// encoder is initialized. Entries default to the decimal text of the code
/// itself and may be replaced wholesale with user-supplied element names;
/// a partial replacement is rejected before any entry is touched, so the
/// table is never left half-populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNameTable {
    names: Vec<String>,
}

impl TypeNameTable {
    /// Builds a table of `ntypes` entries where the entry for code `i` is
    /// the decimal text of `i`.
    pub fn with_defaults(ntypes: usize) -> Self {
        Self {
            names: (1..=ntypes).map(|code| code.to_string()).collect(),
        }
    }

    /// The number of declared species.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Replaces every entry at once.
    ///
    /// The replacement vector is fully built before being swapped in, so a
    /// failure leaves the previous entries intact.
    ///
    /// # Errors
    ///
    /// Returns `EncoderError::ElementCount` unless exactly one name per
    /// declared species is supplied.
    pub fn replace<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), EncoderError> {
        if names.len() != self.names.len() {
            return Err(EncoderError::ElementCount {
                expected: self.names.len(),
                actual: names.len(),
            });
        }
        self.names = names.iter().map(|n| n.as_ref().to_string()).collect();
        Ok(())
    }

    /// Returns the display name for a species code.
    ///
    /// Type codes originate from the trusted particle store and are always
    /// in `[1, N]`; a code outside that range is a caller contract
    /// violation and panics on the index.
    pub fn lookup(&self, type_code: u32) -> &str {
        &self.names[(type_code - 1) as usize]
    }
}
