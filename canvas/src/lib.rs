//! Placement and snap-alignment engine for the road tile designer.
//!
//! This crate is compiled to WebAssembly and runs in the browser, and as a
//! plain library for native tools and tests. It owns every decision about
//! where a dropped tile lands: resolving tile geometry from the catalog,
//! centering it on the drop point, pulling it flush against a neighbor's
//! facing port, and committing it to the surface with single selection. The
//! host layer is responsible only for turning drag events into
//! [`engine::DropRequest`]s and drawing the resulting [`doc::TileView`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Drop orchestration, commands, and the browser [`engine::Engine`] |
//! | [`catalog`] | Tile types, orientations, lanes, and the geometry table |
//! | [`doc`] | Placed tiles, observable views, and the owning [`doc::Surface`] |
//! | [`placement`] | Drop-point-centered positions and bounds checks |
//! | [`snap`] | Neighbor search and flush alignment |
//! | [`palette`] | Per-type pending defaults and options menu rules |
//! | [`hit`] | Hit-testing clicks against placed tiles |
//! | [`viewport`] | Points, boxes, and client-to-canvas conversion |
//! | [`consts`] | Shared numeric constants (tile sizes, snap threshold, etc.) |

pub mod catalog;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod palette;
pub mod placement;
pub mod snap;
pub mod viewport;
