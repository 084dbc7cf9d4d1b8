/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///      .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  Header + Vec<Record>, values kept as text
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
