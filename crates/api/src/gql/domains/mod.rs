// Each domain contains: mod.rs, resolvers.rs, types.rs (and service.rs when
// the mutation logic spans more than one repository call)

pub mod clients;
pub mod orders;
pub mod products;
pub mod reports;
pub mod users;
