//! Systems for the artillery duel simulation.
//!
//! One tick runs the systems as a fixed chain:
//!
//! 1. `command_system` - drains queued worm commands (move, aim, jump, fire)
//! 2. `body_physics_system` - gravity + vertical terrain resolution for
//!    worms and crates
//! 3. `projectile_system` - ballistics, impacts, carving, damage, explosion
//!    spawning
//! 4. `pickup_system` - crate consumption by overlapping worms
//! 5. `explosion_system` - blast lifetime advance and pruning
//!
//! The chain order is the determinism contract: every worm settles before
//! any projectile moves, and projectile impacts resolve in creation order.

pub mod command;
pub mod explosion;
pub mod physics;
pub mod pickup;
pub mod projectile;

pub use command::*;
pub use explosion::*;
pub use physics::*;
pub use pickup::*;
pub use projectile::*;
