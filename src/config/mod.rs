mod settings;

pub use settings::{
    ApiConfig, MailConfig, ServerConfig, Settings, SmtpConfig, TransportKind,
};
