/// Machine translation providers
///
/// The alignment engine needs two things from machine translation: the whole
/// source sentence translated, and optionally the selected word translated on its
/// own. Both come through the [`MachineTranslator`] trait so that the engine stays
/// independent of any particular service.
///
/// - [`GoogleTranslateProvider`] talks to the Google Translate v2 API
/// - [`MockTranslator`] answers from a fixed table, for tests and offline runs
pub mod google_translate;
pub mod mock;
pub mod translator;

pub use google_translate::GoogleTranslateProvider;
pub use mock::{MockMode, MockTranslator};
pub use translator::{MachineTranslator, normalize_language, parse_language, validate_language};
