pub mod bs_service_details;
pub mod neighbour_cell_info;
