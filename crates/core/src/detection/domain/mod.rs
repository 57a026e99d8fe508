pub mod face_landmarker;
