// src/output.rs
//
// Plain-text table writer for simulated depth profiles.
// One sample per line, three space-separated fixed-point columns:
//     distance (cm)   kinetic energy (MeV)   stopping power (MeV/cm)
// each with 8 decimal places, in emission order.

use std::fs::{create_dir_all, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::stepper::{Sample, SampleSink};

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Streams samples to any `Write` destination as the integrator produces
/// them. Buffer and flush behaviour is the caller's choice of `W`.
pub struct TableWriter<W: Write> {
    inner: W,
}

impl TableWriter<BufWriter<File>> {
    /// Create (or truncate) a table file at `path`, creating parent
    /// directories as needed.
    pub fn create(path: &Path) -> io::Result<Self> {
        ensure_parent_dir(path)?;
        let file = File::create(path)?;
        Ok(Self {
            inner: BufWriter::new(file),
        })
    }
}

impl<W: Write> TableWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> SampleSink for TableWriter<W> {
    fn emit(&mut self, sample: &Sample) -> io::Result<()> {
        writeln!(
            self.inner,
            "{:.8} {:.8} {:.8}",
            sample.distance_cm, sample.kinetic_energy_mev, sample.stopping_power_mev_per_cm
        )
    }
}

/// Write a collected profile to `path`.
pub fn write_table(path: &Path, samples: &[Sample]) -> io::Result<()> {
    let mut writer = TableWriter::create(path)?;
    for sample in samples {
        writer.emit(sample)?;
    }
    writer.flush()
}
