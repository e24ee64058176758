// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Namespace for issue-tracker access (search transport and response mapping)
// role: tracker/namespace
// outputs: Public submodules for the search seam and the JSON-to-Issue mapping
// invariants: Only this namespace talks to the tracker; callers see Issue values or ReportError
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod api;
pub mod issues;

pub use api::{Connection, IssueTracker, SearchOptions, build_api};
pub use issues::{Histories, parse_issues};
