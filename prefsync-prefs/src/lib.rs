//! Typed preference store for prefsync.
//!
//! Preferences are named, typed values addressed through [`PrefsKey<T>`].
//! Every key carries a set of string tags that opt it into cross-cutting
//! behavior (for example analytics mirroring) without the call sites that
//! write the preference knowing about it.
//!
//! # Architecture
//!
//! - [`Prefs`] is the store front: typed `put`/`get`/`remove` over JSON values
//! - [`PrefsStorage`] abstracts persistence ([`MemoryStorage`], [`JsonFileStorage`])
//! - [`EventListener`] is the observer interface notified on every mutation
//! - [`KeyDescriptor`] is the type-erased key metadata listeners receive
//!
//! # Example
//!
//! ```
//! use prefsync_prefs::{Prefs, PrefsKey};
//!
//! let prefs = Prefs::in_memory();
//! let dark_mode = PrefsKey::<bool>::new("dark_mode").with_tag("amplitude");
//!
//! prefs.put(&dark_mode, &true).unwrap();
//! assert_eq!(prefs.get(&dark_mode).unwrap(), Some(true));
//! ```

mod error;
mod key;
mod listener;
mod prefs;
mod storage;
mod value;

pub use error::{PrefsError, PrefsResult};
pub use key::{KeyDescriptor, PrefsKey};
pub use listener::{EventListener, ListenerId};
pub use prefs::Prefs;
pub use storage::{JsonFileStorage, MemoryStorage, PrefsStorage};
pub use value::{PrefValue, ValueType};
