/// Data layer: core types, loading, and the three pipeline transforms.
///
/// Architecture:
/// ```text
///  .csv / .json            .csv / .json
///       │                       │
///       ▼                       ▼
///  ┌──────────┐            ┌──────────┐
///  │  loader   │ performance│  loader   │ summary
///  └──────────┘            └──────────┘
///       │                       │
///       ▼                       ▼
///  ┌────────────────┐      ┌──────────────┐
///  │ PerformanceTable│      │ SummaryTable  │
///  └────────────────┘      └──────────────┘
///     │           │              │
///     ▼           ▼              ▼
///  ┌────────┐ ┌─────────┐   ┌─────────┐
///  │ filter  │ │ reshape  │   │ project  │
///  │ → KPIs  │ │ → heatmap│   │ → series │
///  └────────┘ └─────────┘   └─────────┘
/// ```
///
/// All three transforms are pure functions over an immutable loaded table;
/// an external renderer consumes each output independently.
pub mod filter;
pub mod loader;
pub mod model;
pub mod project;
pub mod reshape;
