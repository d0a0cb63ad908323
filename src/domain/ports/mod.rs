mod inventory_port;

pub use inventory_port::{InventoryPort, TransferLine};
