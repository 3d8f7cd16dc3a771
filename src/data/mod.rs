/// Data layer: CSV datasets and column typing.
///
/// Architecture:
/// ```text
///   data directory (*.csv)
///        │
///        ▼
///   ┌────────────┐
///   │ DatasetDir  │  list names, load one → Dataset (no caching)
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  ordered columns of CellValue
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ classify  │  numeric column names
///   └──────────┘
/// ```

pub mod classify;
pub mod loader;
pub mod model;
