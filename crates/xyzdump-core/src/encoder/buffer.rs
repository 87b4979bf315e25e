use super::error::EncoderError;

/// Worst-case rendered size of one record with the default numeric widths.
pub(crate) const RECORD_HEADROOM: usize = 128;

/// Fixed growth increment.
pub(crate) const GROW_CHUNK: usize = 1 << 20;

/// Rendered frame lengths are later passed through interfaces that accept
/// only signed 32-bit sizes, so the buffer may never grow past this.
pub(crate) const LENGTH_CEILING: usize = i32::MAX as usize;

/// Decides how a buffer holding `len` bytes of `capacity` must change
/// before another record may be written: `Ok(None)` to keep it, `Ok(Some
/// (target))` to grow to `target` bytes, or `Err` when the grown buffer
/// could no longer be described by a signed 32-bit length.
pub(crate) fn grow_plan(
    len: usize,
    capacity: usize,
    ceiling: usize,
) -> Result<Option<usize>, EncoderError> {
    if len + RECORD_HEADROOM <= capacity {
        return Ok(None);
    }
    let target = capacity + GROW_CHUNK;
    if target > ceiling {
        return Err(EncoderError::LengthOverflow { capacity: target });
    }
    Ok(Some(target))
}

/// The growable text buffer holding one rendered frame in batch mode.
///
/// Reused across frames by length reset only; capacity is retained to
/// amortize allocation. Growth happens in fixed chunks, checked against
/// the 32-bit ceiling before each record is written.
#[derive(Debug)]
pub(crate) struct RenderBuffer {
    text: String,
    ceiling: usize,
}

impl RenderBuffer {
    pub(crate) fn new() -> Self {
        Self {
            text: String::new(),
            ceiling: LENGTH_CEILING,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_ceiling(ceiling: usize) -> Self {
        Self {
            text: String::new(),
            ceiling,
        }
    }

    /// Resets the tracked length for a new frame without releasing capacity.
    pub(crate) fn begin_frame(&mut self) {
        self.text.clear();
    }

    /// Guarantees headroom for one more record, growing if needed.
    ///
    /// # Errors
    ///
    /// Returns `EncoderError::LengthOverflow` when growth would cross the
    /// 32-bit ceiling; nothing has been written for the offending record
    /// at that point.
    pub(crate) fn ensure_record_headroom(&mut self) -> Result<(), EncoderError> {
        if let Some(target) = grow_plan(self.text.len(), self.text.capacity(), self.ceiling)? {
            self.text.reserve_exact(target - self.text.len());
        }
        Ok(())
    }

    /// The record sink for template rendering.
    pub(crate) fn line_sink(&mut self) -> &mut String {
        &mut self.text
    }

    /// Exact number of bytes rendered so far this frame.
    pub(crate) fn len(&self) -> usize {
        self.text.len()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}
