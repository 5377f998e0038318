mod bus;
mod protocol;

pub use bus::{create_channel_pair, BackgroundProxy, BackgroundSideChannel, PageSideChannel};
pub use protocol::{
    CaptureRequest, CaptureResponse, EncodedBinary, FetchOptions, FetchReply, FetchRequest,
    ProxyReply, ProxyRequest, RequestFrame, ResponseFrame,
};
