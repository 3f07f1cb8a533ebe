pub mod generic;
pub mod object_name;
pub mod path;
pub mod session;
pub mod types;
pub mod vendor;

pub use generic::GenericSession;
pub use object_name::ObjectName;
pub use session::{JmxSession, VendorSession};
pub use types::{AttributeInfo, MBeanValue, Primitive, RangeStatistic, StatsNode};
pub use vendor::VendorClient;

/// IPv6 адрес в URL нужно брать в квадратные скобки.
pub(crate) fn bracket_host(host: &str) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{}]", host)
    } else {
        host.to_string()
    }
}
