// Explorer core: region lookup, request tracking, map viewport, insights, session.

pub mod fetch;
pub mod gazetteer;
pub mod insights;
pub mod session;
pub mod viewport;

pub use fetch::{DataRequest, FetchState, Fetcher, Ticket};
pub use gazetteer::{Gazetteer, RegionEntry, ResolveError};
pub use insights::{fallback_insights, load_insights, Insight};
pub use session::AuthContext;
pub use viewport::{MapController, Viewport};
