//! Integration tests for labcheck
//!
//! Each test builds a throwaway labs tree whose "binaries" are `/bin/sh`
//! scripts behaving like correct (or deliberately broken) lab programs.

mod cli;
mod helpers;
mod lab_suites;
