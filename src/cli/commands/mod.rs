pub mod budget;
pub mod expense;
pub mod report;
pub mod system;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let definitions = expense::definitions()
        .into_iter()
        .chain(report::definitions())
        .chain(budget::definitions())
        .chain(system::definitions());
    for entry in definitions {
        registry.register(entry);
    }
}
