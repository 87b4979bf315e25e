use crate::core::models::region::SimBox;
use crate::core::models::store::ParticleStore;
use crate::encoder::error::EncoderError;
use crate::encoder::extxyz::ExtxyzEncoder;
use std::io::Write;
use tracing::{info, instrument};

/// Summary of one emitted trajectory frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Number of selected particles in the frame.
    pub particles: usize,
    /// Number of record bytes written after the header.
    pub bytes: usize,
}

/// Emits one complete trajectory frame to the sink.
///
/// This is the single-process driver: pack the selected particles, write
/// the header, then write the records through the output variant fixed at
/// encoder initialization. In a multi-process run the host instead calls
/// the encoder steps itself, gathering rendered buffers to the writer rank
/// between `convert` and `write_rendered`.
///
/// # Errors
///
/// Propagates the batch-mode length overflow and sink I/O errors.
#[instrument(skip_all, name = "dump_frame")]
pub fn write_frame<W: Write>(
    store: &ParticleStore,
    simbox: &SimBox,
    encoder: &mut ExtxyzEncoder,
    out: &mut W,
) -> Result<FrameReport, EncoderError> {
    let mut records = Vec::new();
    encoder.pack(store, simbox, &mut records, None);
    encoder.write_header(records.len() as u64, simbox, out)?;
    let bytes = encoder.write_data(&records, out)?;

    info!(particles = records.len(), bytes, "trajectory frame written");
    Ok(FrameReport {
        particles: records.len(),
        bytes,
    })
}
