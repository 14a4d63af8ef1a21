//! Font store lifecycle
//!
//! Load-once, clear-once cache of the seven system fonts. Loading walks the
//! static table in order, opening each source container once per run of
//! adjacent entries, and descrambles every fetched BFTTF in place. A font
//! that fails at any step is skipped; the load as a whole only fails when
//! nothing could be decoded.

use crate::container::{Container, ContainerSource};
use crate::error::{Error, Result};
use crate::table::FontDescriptor;
use crate::types::{FontData, FontKind};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Default)]
struct Slots {
    loaded: bool,
    loaded_count: usize,
    fonts: [Option<Arc<Vec<u8>>>; FontKind::COUNT],
}

/// Cache of decoded system fonts, keyed by [`FontKind`].
///
/// Stores are independent of each other; none of the state is process-wide.
/// `load` and `clear` serialize on a write lock, `font` takes a brief read
/// lock to clone out a handle.
#[derive(Default)]
pub struct FontStore {
    slots: RwLock<Slots>,
}

impl FontStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every font in the table from `source`.
    ///
    /// Idempotent: once a load has succeeded, later calls touch no container
    /// and return the original count. Individual fonts that cannot be
    /// fetched or decoded are logged and skipped; the call fails with
    /// [`Error::NoFontsLoaded`] only when every slot failed, in which case
    /// the store stays unloaded and a later call may retry.
    pub fn load(&self, source: &dyn ContainerSource) -> Result<usize> {
        let mut slots = self.slots.write();

        if slots.loaded {
            debug!("font store already loaded, skipping");
            return Ok(slots.loaded_count);
        }

        let mut count = 0;
        let mut current: Option<(crate::TitleId, Option<Box<dyn Container + '_>>)> = None;

        for kind in FontKind::ALL {
            let descriptor = kind.descriptor();

            // Open the container only when the title ID changes from the
            // previous entry; a failed open skips the whole run.
            let reuse = matches!(&current, Some((id, _)) if *id == descriptor.title_id);
            if !reuse {
                match source.open(descriptor.title_id) {
                    Ok(container) => current = Some((descriptor.title_id, Some(container))),
                    Err(e) => {
                        current = Some((descriptor.title_id, None));
                        warn!(
                            "skipping {kind}: cannot open container {}: {e}",
                            descriptor.title_id
                        );
                        continue;
                    }
                }
            }

            let Some((_, Some(container))) = current.as_ref() else {
                warn!(
                    "skipping {kind}: container {} unavailable",
                    descriptor.title_id
                );
                continue;
            };

            match fetch_font(container.as_ref(), &descriptor) {
                Ok(raw) => {
                    debug!(
                        "loaded {kind} from {} {} ({} bytes)",
                        descriptor.title_id,
                        descriptor.path,
                        raw.len()
                    );
                    slots.fonts[kind.index()] = Some(Arc::new(raw));
                    count += 1;
                }
                Err(e) => {
                    warn!(
                        "skipping {kind} ({} {}): {e}",
                        descriptor.title_id, descriptor.path
                    );
                }
            }
        }

        if count == 0 {
            warn!("no system fonts retrieved");
            return Err(Error::NoFontsLoaded);
        }

        info!("loaded {count} of {} system fonts", FontKind::COUNT);
        slots.loaded = true;
        slots.loaded_count = count;
        Ok(count)
    }

    /// Handle to a decoded font, or `None` when its slot never populated.
    pub fn font(&self, kind: FontKind) -> Option<FontData> {
        let slots = self.slots.read();
        let raw = slots.fonts[kind.index()].as_ref()?;
        if raw.len() <= bfttf::HEADER_LEN {
            return None;
        }
        Some(FontData::new(kind, Arc::clone(raw)))
    }

    /// Whether a previous [`load`](Self::load) succeeded.
    pub fn is_loaded(&self) -> bool {
        self.slots.read().loaded
    }

    /// Drop every cached font and mark the store unloaded.
    ///
    /// Idempotent, and safe to call whether or not a load ever succeeded.
    /// Handles cloned out earlier keep their buffers alive.
    pub fn clear(&self) {
        let mut slots = self.slots.write();
        for slot in &mut slots.fonts {
            *slot = None;
        }
        slots.loaded = false;
        slots.loaded_count = 0;
        debug!("font store cleared");
    }
}

/// Fetch and descramble one table entry.
///
/// The buffer is owned here, so any failure releases it on return.
fn fetch_font(container: &dyn Container, descriptor: &FontDescriptor) -> Result<Vec<u8>> {
    let entry = container.resolve(descriptor.path)?;

    if entry.size == 0 {
        return Err(Error::EmptyEntry {
            title_id: descriptor.title_id,
            path: descriptor.path.to_string(),
        });
    }

    let mut raw = vec![0u8; entry.size as usize];
    container.read_at(&entry, 0, &mut raw)?;
    bfttf::descramble(&mut raw)?;
    Ok(raw)
}
