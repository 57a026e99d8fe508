pub mod warp_controller;
