pub mod gateway;
pub mod remote;
pub mod repository;
pub mod submodule;

#[cfg(test)]
pub mod fake;

pub use gateway::{LogEntry, LogOrder, LogQuery, TreeEntry, VersionControl, WorkTree};
pub use remote::{RemoteInfo, is_relative_url, parse_remote_url};
pub use repository::{GitGateway, GitRepository};
pub use submodule::SubmoduleDeclaration;
