//! Shared test harness modules for the Saferoute CLI.

use super::*;

mod helpers;
