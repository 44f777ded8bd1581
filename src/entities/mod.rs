pub mod prelude;

pub mod arcs;
pub mod characters;
pub mod crew_members;
pub mod crews;
pub mod devil_fruits;
pub mod episodes;
pub mod fruit_holders;
pub mod users;
