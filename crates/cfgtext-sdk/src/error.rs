use cfgtext_import::ConfigFileFormat;
use cfgtext_types::NamespaceId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("namespace not found: {0}")]
    NamespaceNotFound(NamespaceId),

    #[error("no namespace registered for {0}")]
    UnknownTarget(String),

    #[error("config text is {size} bytes, limit is {limit}")]
    TextTooLarge { size: usize, limit: usize },

    #[error("namespaces in {0} format cannot be edited as text")]
    UnsupportedFormat(ConfigFileFormat),

    #[error(transparent)]
    Resolve(#[from] cfgtext_resolve::ResolveError),

    #[error("store error: {0}")]
    Store(#[from] cfgtext_store::StoreError),

    #[error("import error: {0}")]
    Import(#[from] cfgtext_import::ImportError),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SdkResult<T> = Result<T, SdkError>;
