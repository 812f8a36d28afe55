mod test_frame_basic;
mod test_helix_basic;
mod test_tube_basic;
