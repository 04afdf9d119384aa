#![cfg(unix)]

mod fake_solver;

mod check;
mod ground;
mod solve;
