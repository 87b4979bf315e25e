use super::buffer::RenderBuffer;
use super::error::EncoderError;
use super::template::LineTemplate;
use super::typenames::TypeNameTable;
use crate::core::models::record::DumpRecord;
use crate::core::models::region::{BoxShape, SimBox};
use crate::core::models::selection::GroupMask;
use crate::core::models::store::ParticleStore;
use std::io::Write;
use tracing::debug;

const ELEMENT_KEYWORD: &str = "element";

/// Encoder construction options, fixed for the encoder's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderOptions {
    /// Batch mode: render the whole frame into one buffer before writing.
    /// When off, records are rendered and flushed one line at a time.
    pub buffered: bool,
    /// Binary output; always rejected, the extxyz format is text.
    pub binary: bool,
    /// One file per process; always rejected, frames go to a single sink.
    pub multi_file: bool,
    /// User override for the per-record line format (printf style).
    pub format_line: Option<String>,
    /// Emit tilt factors in the lattice descriptor of triclinic cells.
    /// Off keeps the diagonal-only descriptor for compatibility.
    pub skew_lattice: bool,
    /// Which particles are included in the output.
    pub group: GroupMask,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            buffered: true,
            binary: false,
            multi_file: false,
            format_line: None,
            skew_lattice: false,
            group: GroupMask::all(),
        }
    }
}

/// Geometry handling, chosen once at initialization from the box shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeometryVariant {
    Orthogonal,
    Triclinic,
}

/// Output path, chosen once at initialization from the buffering flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteVariant {
    Buffered,
    PerLine,
}

/// The extended-XYZ trajectory frame encoder.
///
/// Converts per-particle numeric state into one textual frame per
/// invocation cycle: header, then one line per selected particle. The
/// host framework owns particle storage, parallel collection, and file
/// lifecycle; this type owns record selection, coordinate convention,
/// species naming, line rendering, and the batch buffer with its 32-bit
/// length ceiling.
#[derive(Debug)]
pub struct ExtxyzEncoder {
    ntypes: usize,
    type_names: TypeNameTable,
    template: LineTemplate,
    group: GroupMask,
    geometry: GeometryVariant,
    write_variant: WriteVariant,
    skew_lattice: bool,
    buffer: RenderBuffer,
}

impl ExtxyzEncoder {
    /// Validates the options and fixes the encoder's variants.
    ///
    /// The geometry variant (orthogonal vs. triclinic packing and header)
    /// and the write variant (batch vs. per-line) are selected here and
    /// never re-examined during per-frame calls.
    ///
    /// # Errors
    ///
    /// Configuration errors: binary or multi-file output requested, a
    /// species count of zero, or a line format that does not compile.
    pub fn init(
        options: &EncoderOptions,
        ntypes: usize,
        shape: BoxShape,
    ) -> Result<Self, EncoderError> {
        if options.binary {
            return Err(EncoderError::BinaryUnsupported);
        }
        if options.multi_file {
            return Err(EncoderError::MultiFileUnsupported);
        }
        if ntypes == 0 {
            return Err(EncoderError::InvalidTypeCount(ntypes));
        }

        let template = match &options.format_line {
            Some(line) => LineTemplate::compile(line)?,
            None => LineTemplate::default_line(),
        };
        let geometry = match shape {
            BoxShape::Orthogonal => GeometryVariant::Orthogonal,
            BoxShape::Triclinic { .. } => GeometryVariant::Triclinic,
        };
        let write_variant = if options.buffered {
            WriteVariant::Buffered
        } else {
            WriteVariant::PerLine
        };
        debug!(ntypes, ?geometry, ?write_variant, "initialized extxyz encoder");

        Ok(Self {
            ntypes,
            type_names: TypeNameTable::with_defaults(ntypes),
            template,
            group: options.group,
            geometry,
            write_variant,
            skew_lattice: options.skew_lattice,
            buffer: RenderBuffer::new(),
        })
    }

    /// The number of declared species.
    pub fn ntypes(&self) -> usize {
        self.ntypes
    }

    /// The current species name table.
    pub fn type_names(&self) -> &TypeNameTable {
        &self.type_names
    }

    /// Whether the encoder renders whole frames into the batch buffer.
    pub fn is_buffered(&self) -> bool {
        self.write_variant == WriteVariant::Buffered
    }

    /// Applies one reconfiguration command, returning the number of tokens
    /// consumed.
    ///
    /// `element` followed by one name per declared species replaces the
    /// species name table atomically and consumes N+1 tokens. An
    /// unrecognized leading token consumes 0 tokens and is not an error.
    ///
    /// # Errors
    ///
    /// Returns `EncoderError::ElementCount` when fewer names than declared
    /// species follow the `element` token; the table is left unchanged.
    pub fn modify_param(&mut self, args: &[&str]) -> Result<usize, EncoderError> {
        match args.first() {
            Some(&ELEMENT_KEYWORD) => {
                let names = &args[1..];
                if names.len() < self.ntypes {
                    return Err(EncoderError::ElementCount {
                        expected: self.ntypes,
                        actual: names.len(),
                    });
                }
                self.type_names.replace(&names[..self.ntypes])?;
                debug!(ntypes = self.ntypes, "replaced species name table");
                Ok(self.ntypes + 1)
            }
            _ => Ok(0),
        }
    }

    /// Writes the per-frame header: total particle count, then the lattice
    /// descriptor built from the box extents.
    ///
    /// Only the designated writer rank calls this; rank bookkeeping is the
    /// host's. Repeated calls with identical inputs produce byte-identical
    /// output.
    ///
    /// # Errors
    ///
    /// Propagates sink I/O errors.
    pub fn write_header<W: Write>(
        &self,
        count: u64,
        simbox: &SimBox,
        out: &mut W,
    ) -> Result<(), EncoderError> {
        let extents = simbox.extents();
        writeln!(out, "{count}")?;
        match (self.geometry, simbox.shape()) {
            (GeometryVariant::Triclinic, BoxShape::Triclinic { xy, xz, yz })
                if self.skew_lattice =>
            {
                writeln!(
                    out,
                    "Lattice=\"{} 0.0 0.0 {} {} 0.0 {} {} {}\" ",
                    extents.x, xy, extents.y, xz, yz, extents.z
                )?;
            }
            _ => {
                // Skewed cells fall back to the diagonal-only descriptor
                // unless skew output was enabled at init.
                writeln!(
                    out,
                    "Lattice=\"{} 0.0 0.0 0.0 {} 0.0 0.0 0.0 {}\" ",
                    extents.x, extents.y, extents.z
                )?;
            }
        }
        Ok(())
    }

    /// Packs one record per selected particle, in local storage order.
    ///
    /// Orthogonal cells emit box-local coordinates (position minus the
    /// lower bound); triclinic cells emit raw absolute coordinates, since
    /// origin subtraction is meaningless under skew without the full tilt
    /// transform. When `ids` is supplied, the selected identifiers are
    /// mirrored into it for the host's cross-frame sort bookkeeping.
    pub fn pack(
        &self,
        store: &ParticleStore,
        simbox: &SimBox,
        records: &mut Vec<DumpRecord>,
        mut ids: Option<&mut Vec<i64>>,
    ) {
        records.clear();
        if let Some(ids) = ids.as_deref_mut() {
            ids.clear();
        }

        let origin = simbox.lo();
        for row in store.rows() {
            if !self.group.matches(row.group_bits) {
                continue;
            }
            let position = match self.geometry {
                GeometryVariant::Orthogonal => row.position - origin.coords,
                GeometryVariant::Triclinic => row.position,
            };
            records.push(DumpRecord {
                id: row.id,
                type_code: row.type_code,
                position,
            });
            if let Some(ids) = ids.as_deref_mut() {
                ids.push(row.id);
            }
        }
    }

    /// Renders records into the batch buffer and returns the exact number
    /// of bytes produced.
    ///
    /// The identifier field of each record is skipped; only the species
    /// name and the coordinate triple are rendered. The buffer is reused
    /// across frames without reallocation.
    ///
    /// # Errors
    ///
    /// Returns `EncoderError::LengthOverflow` when the buffer would have
    /// to grow past the signed 32-bit ceiling; the frame must then be
    /// treated as failed, no partial length is reported.
    pub fn convert(&mut self, records: &[DumpRecord]) -> Result<usize, EncoderError> {
        self.buffer.begin_frame();
        for record in records {
            self.buffer.ensure_record_headroom()?;
            let name = self.type_names.lookup(record.type_code);
            self.template.render(self.buffer.line_sink(), name, &record.position);
        }
        Ok(self.buffer.len())
    }

    /// The batch buffer contents rendered by the last [`convert`] call.
    ///
    /// [`convert`]: Self::convert
    pub fn rendered(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// Verbatim byte-for-byte passthrough of an already-rendered buffer.
    ///
    /// This is also the path for foreign buffers the host gathered from
    /// non-writer ranks.
    ///
    /// # Errors
    ///
    /// Propagates sink I/O errors.
    pub fn write_rendered<W: Write>(&self, bytes: &[u8], out: &mut W) -> Result<(), EncoderError> {
        out.write_all(bytes)?;
        Ok(())
    }

    /// Writes one frame's records through the variant fixed at init.
    ///
    /// Batch mode renders everything into the internal buffer and writes
    /// it in one piece; per-line mode renders and flushes each record
    /// immediately, so no length ceiling applies. Returns the number of
    /// bytes written.
    ///
    /// # Errors
    ///
    /// `EncoderError::LengthOverflow` in batch mode when the frame cannot
    /// be described by a signed 32-bit length; sink I/O errors otherwise.
    pub fn write_data<W: Write>(
        &mut self,
        records: &[DumpRecord],
        out: &mut W,
    ) -> Result<usize, EncoderError> {
        match self.write_variant {
            WriteVariant::Buffered => {
                let len = self.convert(records)?;
                out.write_all(self.buffer.as_bytes())?;
                Ok(len)
            }
            WriteVariant::PerLine => {
                let mut line = String::new();
                let mut written = 0;
                for record in records {
                    line.clear();
                    let name = self.type_names.lookup(record.type_code);
                    self.template.render(&mut line, name, &record.position);
                    out.write_all(line.as_bytes())?;
                    written += line.len();
                }
                Ok(written)
            }
        }
    }

    #[cfg(test)]
    fn set_buffer_ceiling(&mut self, ceiling: usize) {
        self.buffer = RenderBuffer::with_ceiling(ceiling);
    }
}
