


// Process tests
mod solver_options;
