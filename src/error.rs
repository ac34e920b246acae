use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::MalformedMember {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::MalformedMember {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Only [`Error::NotFound`] ever leaves [`crate::build_inventory`]. The other variants are produced
/// by the individual renderers and the substitution engine; the inventory builder consumes them,
/// logs them, and degrades to a smaller result instead of failing.
///
/// # Examples
///
/// ```rust
/// use declscope::{build_inventory, metadata::MetadataStore, Error, TraversalConfig};
///
/// let store = MetadataStore::new();
/// match build_inventory(&store, "SchoolSys.IMember", &TraversalConfig::default()) {
///     Ok(inventory) => println!("{}", inventory.full_declaration),
///     Err(Error::NotFound(path)) => eprintln!("Type [{}] is not found!", path),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The requested type path is absent from every assembly known to the provider.
    ///
    /// This is the only fatal condition of an inventory query.
    #[error("Type [{0}] is not found")]
    NotFound(String),

    /// A member has a shape the renderers cannot classify.
    ///
    /// Examples are an event without add/remove methods, or a property without any accessor.
    /// The member is skipped and the traversal continues.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed member - {file}:{line}: {message}")]
    MalformedMember {
        /// The message to be printed for the `MalformedMember` error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A generic parameter of an inherited signature could not be matched to any formal
    /// parameter of the base-type instantiation.
    ///
    /// The original, unsubstituted type is kept.
    #[error("Unresolved generic argument - {0}")]
    UnresolvedGenericArgument(String),

    /// Recursion limit reached while walking a base-type chain.
    ///
    /// The associated value shows the depth limit that was reached.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),
}
