//! Workspace zones and the rules each one enforces.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// Library name the backend's own modules are reachable under.
const APP_CRATE: &str = "user_registry";

const WEB_CRATES: [&str; 4] = ["actix_http", "actix_web", "utoipa", "utoipa_swagger_ui"];
const SQL_CRATES: [&str; 4] = ["bb8", "diesel", "diesel_async", "diesel_migrations"];
const HOST_CRATES: [&str; 2] = ["ortho_config", "tracing_subscriber"];
const RUNTIME_CRATES: [&str; 3] = ["chrono", "tokio", "tracing"];

/// Clock sources that read the host's time instead of the injected clock.
const WALL_CLOCKS: [&str; 4] = ["Local", "Utc", "SystemTime", "Instant"];

/// Driven ports the HTTP adapter must not reach around the service for.
const DRIVEN_PORTS: [&str; 2] = ["UserRepository", "MockUserRepository"];

/// A region of the workspace with its own layering rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Zone {
    /// `backend/src/domain`: model, rules, ports and service.
    Domain,
    /// `backend/src/inbound`: HTTP adapter.
    Inbound,
    /// `backend/src/outbound`: repository adapters.
    Outbound,
    /// `backend/crates/pagination`: framework-free paging primitives.
    Pagination,
}

impl Zone {
    /// Every zone, in the order sources are read.
    pub const ALL: [Self; 4] = [Self::Domain, Self::Inbound, Self::Outbound, Self::Pagination];

    /// Workspace-relative directory holding the zone's sources.
    #[must_use]
    pub const fn root(self) -> &'static str {
        match self {
            Self::Domain => "backend/src/domain",
            Self::Inbound => "backend/src/inbound",
            Self::Outbound => "backend/src/outbound",
            Self::Pagination => "backend/crates/pagination/src",
        }
    }

    /// Zone owning a workspace-relative file, if any.
    #[must_use]
    pub fn of(file: &Path) -> Option<Self> {
        Self::ALL.into_iter().find(|zone| file.starts_with(zone.root()))
    }

    /// Sibling backend modules this zone may not name.
    fn banned_modules(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &["inbound", "outbound"],
            Self::Inbound => &["outbound"],
            Self::Outbound => &["inbound"],
            Self::Pagination => &[],
        }
    }

    fn banned_crates(self) -> BTreeSet<&'static str> {
        let lists: &[&[&'static str]] = match self {
            Self::Domain => &[&WEB_CRATES, &SQL_CRATES, &HOST_CRATES],
            Self::Inbound => &[&SQL_CRATES],
            Self::Outbound => &[&WEB_CRATES],
            Self::Pagination => &[&WEB_CRATES, &SQL_CRATES, &HOST_CRATES, &RUNTIME_CRATES, &[APP_CRATE]],
        };
        lists.iter().flat_map(|list| list.iter().copied()).collect()
    }

    /// Every rule the named `paths` break, deduplicated and sorted.
    pub(crate) fn breaches(self, paths: &BTreeSet<Vec<String>>) -> BTreeSet<Breach> {
        let banned_crates = self.banned_crates();
        let mut found = BTreeSet::new();
        for path in paths {
            let segments: Vec<&str> = path.iter().map(String::as_str).collect();
            if let Some(module) = sibling_module(&segments)
                .and_then(|m| self.banned_modules().iter().copied().find(|banned| *banned == m))
            {
                found.insert(Breach::Module { zone: self, module });
            }
            if let Some(name) = segments
                .first()
                .and_then(|root| banned_crates.iter().copied().find(|name| name == root))
            {
                found.insert(Breach::Crate { zone: self, name });
            }
            match self {
                Self::Domain => {
                    if let Some(clock) = wall_clock_read(&segments) {
                        found.insert(Breach::WallClock { clock });
                    }
                }
                Self::Inbound => {
                    if let Some(port) = driven_port(&segments) {
                        found.insert(Breach::DrivenPort { port });
                    }
                }
                Self::Outbound | Self::Pagination => {}
            }
        }
        found
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
            Self::Pagination => "pagination",
        })
    }
}

/// A single broken rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breach {
    /// A zone named a backend module it must stay independent of.
    Module {
        /// Offending zone.
        zone: Zone,
        /// Module named.
        module: &'static str,
    },
    /// A zone named a crate outside its allowance.
    Crate {
        /// Offending zone.
        zone: Zone,
        /// Crate named.
        name: &'static str,
    },
    /// Domain code read the host clock.
    WallClock {
        /// Clock type whose `now` was called.
        clock: &'static str,
    },
    /// HTTP code named a driven port.
    DrivenPort {
        /// Port named.
        port: &'static str,
    },
}

impl fmt::Display for Breach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module { zone, module } => write!(f, "{zone} must not depend on crate::{module}"),
            Self::Crate { zone, name } => write!(f, "{zone} must not depend on `{name}`"),
            Self::WallClock { clock } => write!(
                f,
                "domain must take the time from the injected clock, not `{clock}::now`"
            ),
            Self::DrivenPort { port } => write!(
                f,
                "inbound must call the driving ports, not the driven port `{port}`"
            ),
        }
    }
}

/// The backend module a path names, whether written `crate::x`, `super::x`,
/// `user_registry::x` or a bare `x`.
fn sibling_module<'a>(segments: &[&'a str]) -> Option<&'a str> {
    let first = *segments.first()?;
    match first {
        "crate" | "self" | "super" => segments
            .iter()
            .copied()
            .find(|segment| !matches!(*segment, "crate" | "self" | "super")),
        APP_CRATE => segments.get(1).copied(),
        _ => Some(first),
    }
}

fn wall_clock_read(segments: &[&str]) -> Option<&'static str> {
    match segments {
        [.., clock, "now"] => WALL_CLOCKS.iter().copied().find(|known| known == clock),
        _ => None,
    }
}

fn driven_port(segments: &[&str]) -> Option<&'static str> {
    segments
        .iter()
        .find_map(|segment| DRIVEN_PORTS.iter().copied().find(|port| port == segment))
}
