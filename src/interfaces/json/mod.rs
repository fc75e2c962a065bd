pub mod frame_writer;
pub mod request_reader;
