pub use super::arcs::Entity as Arcs;
pub use super::characters::Entity as Characters;
pub use super::crew_members::Entity as CrewMembers;
pub use super::crews::Entity as Crews;
pub use super::devil_fruits::Entity as DevilFruits;
pub use super::episodes::Entity as Episodes;
pub use super::fruit_holders::Entity as FruitHolders;
pub use super::users::Entity as Users;
