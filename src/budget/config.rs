#[derive(Clone, Debug, Default)]
pub struct BudgetProcessorConfig {}
