//! Wire messages exchanged with clients, encoded with prost.

pub mod client {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ClientMessage {
        #[prost(oneof = "client_message::Payload", tags = "1, 2, 3, 4, 5")]
        pub payload: Option<client_message::Payload>,
    }

    pub mod client_message {
        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum Payload {
            #[prost(message, tag = "1")]
            Join(super::Join),
            #[prost(message, tag = "2")]
            Leave(super::Leave),
            #[prost(message, tag = "3")]
            GameMessage(super::GameMessage),
            #[prost(message, tag = "4")]
            Reset(super::Reset),
            #[prost(message, tag = "5")]
            Ping(super::Ping),
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Join {
        #[prost(string, tag = "1")]
        pub player_name: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Leave {}

    /// Opaque game input, decoded by the game itself
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct GameMessage {
        #[prost(bytes = "vec", tag = "1")]
        pub payload: Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Reset {}

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Ping {
        #[prost(uint64, tag = "1")]
        pub timestamp: u64,
        #[prost(uint32, tag = "2")]
        pub sequence: u32,
    }
}

pub mod server {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ServerMessage {
        #[prost(oneof = "server_message::Payload", tags = "1, 2, 3, 4")]
        pub payload: Option<server_message::Payload>,
    }

    pub mod server_message {
        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum Payload {
            #[prost(message, tag = "1")]
            Joined(super::Joined),
            #[prost(message, tag = "2")]
            GameMessage(super::GameMessage),
            #[prost(message, tag = "3")]
            Pong(super::Pong),
            #[prost(message, tag = "4")]
            Error(super::Error),
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Joined {
        #[prost(uint32, tag = "1")]
        pub session_id: u32,
        #[prost(uint32, tag = "2")]
        pub tick_rate_hz: u32,
    }

    /// Opaque game output: a state snapshot or an event
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct GameMessage {
        #[prost(bytes = "vec", tag = "1")]
        pub payload: Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Pong {
        #[prost(uint64, tag = "1")]
        pub timestamp: u64,
        #[prost(uint32, tag = "2")]
        pub sequence: u32,
        #[prost(uint64, tag = "3")]
        pub server_time: u64,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Error {
        #[prost(string, tag = "1")]
        pub message: String,
    }
}

pub mod spider {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum InputDirection {
        Unspecified = 0,
        Up = 1,
        Down = 2,
        Left = 3,
        Right = 4,
        Stop = 5,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum SpiderModeKind {
        Idle = 0,
        Moving = 1,
        Drawing = 2,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct SpiderInput {
        #[prost(enumeration = "InputDirection", tag = "1")]
        pub direction: i32,
    }

    /// Everything a renderer needs for one frame.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ArenaState {
        #[prost(uint32, tag = "1")]
        pub tick: u32,
        #[prost(uint32, tag = "2")]
        pub width: u32,
        #[prost(uint32, tag = "3")]
        pub height: u32,
        #[prost(int32, tag = "4")]
        pub step: i32,
        /// Row-major, `width * height`
        #[prost(bool, repeated, tag = "5")]
        pub claimed: Vec<bool>,
        /// `H[x][y]` at `y * width + x`
        #[prost(bool, repeated, tag = "6")]
        pub committed_h: Vec<bool>,
        /// `V[x][y]` at `y * (width + 1) + x`
        #[prost(bool, repeated, tag = "7")]
        pub committed_v: Vec<bool>,
        #[prost(bool, repeated, tag = "8")]
        pub path_h: Vec<bool>,
        #[prost(bool, repeated, tag = "9")]
        pub path_v: Vec<bool>,
        #[prost(int32, tag = "10")]
        pub spider_x: i32,
        #[prost(int32, tag = "11")]
        pub spider_y: i32,
        #[prost(enumeration = "InputDirection", tag = "12")]
        pub velocity: i32,
        #[prost(enumeration = "SpiderModeKind", tag = "13")]
        pub mode: i32,
        #[prost(uint32, tag = "14")]
        pub claimed_count: u32,
        #[prost(uint32, tag = "15")]
        pub total_cells: u32,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct TerritoryClaimed {
        #[prost(uint32, tag = "1")]
        pub cells_claimed: u32,
        #[prost(uint32, tag = "2")]
        pub claimed_count: u32,
        #[prost(uint32, tag = "3")]
        pub total_cells: u32,
        #[prost(bool, tag = "4")]
        pub self_intersection: bool,
    }

    /// Game-level envelope carried inside `server::GameMessage`.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct SpiderEvent {
        #[prost(oneof = "spider_event::Event", tags = "1, 2")]
        pub event: Option<spider_event::Event>,
    }

    pub mod spider_event {
        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum Event {
            #[prost(message, tag = "1")]
            State(super::ArenaState),
            #[prost(message, tag = "2")]
            Claimed(super::TerritoryClaimed),
        }
    }
}
