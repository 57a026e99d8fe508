pub mod last_good_landmarker;
pub mod replay_landmarker;
