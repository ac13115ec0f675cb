//! Repositorios
//!
//! Este módulo contiene el acceso a datos sobre PostgreSQL.

pub mod route_repository;
pub mod user_repository;
