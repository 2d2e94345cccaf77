mod manage_dish;
mod manage_order;

pub use manage_dish::{CreateDishUseCase, EditDishUseCase, ListDishesUseCase, RetrieveDishUseCase};
pub use manage_order::{
    CreateOrderUseCase, DiscardOrderUseCase, EditOrderUseCase, ListOrdersUseCase,
    RetrieveOrderUseCase,
};
