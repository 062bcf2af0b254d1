use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

pub type SessionId = u32;

#[derive(Debug, Clone)]
pub struct Session {
    pub session_id: SessionId,
    pub player_name: String,
    pub addr: SocketAddr,
    pub last_seen: Instant,
    pub last_ping: Option<Instant>,
    pub ping_count: u32,
}

/// Tracks every client steering or watching the arena
pub struct SessionManager {
    /// Map from socket address to session
    sessions_by_addr: HashMap<SocketAddr, Session>,
    /// Next session ID to assign
    next_session_id: SessionId,
    /// How long before a session is considered timed out
    timeout_duration: Duration,
}

impl SessionManager {
    pub fn new(timeout_seconds: u64) -> Self {
        Self {
            sessions_by_addr: HashMap::new(),
            next_session_id: 1,
            timeout_duration: Duration::from_secs(timeout_seconds),
        }
    }

    /// Register `addr`, or refresh it if it already joined.
    pub fn register(&mut self, addr: SocketAddr, player_name: String) -> &Session {
        let next_id = &mut self.next_session_id;
        let session = self.sessions_by_addr.entry(addr).or_insert_with(|| {
            let session_id = *next_id;
            *next_id += 1;
            tracing::info!("New session registered: id={}, addr={}", session_id, addr);
            Session {
                session_id,
                player_name: String::new(),
                addr,
                last_seen: Instant::now(),
                last_ping: None,
                ping_count: 0,
            }
        });

        session.player_name = player_name;
        session.last_seen = Instant::now();
        session
    }

    pub fn ping(&mut self, addr: &SocketAddr) {
        if let Some(session) = self.sessions_by_addr.get_mut(addr) {
            session.last_ping = Some(Instant::now());
            session.last_seen = Instant::now();
            session.ping_count += 1;
        }
    }

    pub fn update_last_seen(&mut self, addr: &SocketAddr) {
        if let Some(session) = self.sessions_by_addr.get_mut(addr) {
            session.last_seen = Instant::now();
        }
    }

    pub fn get_by_addr(&self, addr: &SocketAddr) -> Option<&Session> {
        self.sessions_by_addr.get(addr)
    }

    pub fn remove(&mut self, addr: &SocketAddr) -> Option<Session> {
        let session = self.sessions_by_addr.remove(addr)?;
        tracing::info!(
            "Session closed: id={}, addr={}",
            session.session_id,
            addr
        );
        Some(session)
    }

    pub fn cleanup_timed_out(&mut self) -> Vec<Session> {
        self.cleanup_idle_since(Instant::now())
    }

    fn cleanup_idle_since(&mut self, now: Instant) -> Vec<Session> {
        let timeout = self.timeout_duration;

        let timed_out_addrs: Vec<SocketAddr> = self
            .sessions_by_addr
            .iter()
            .filter(|(_, session)| now.saturating_duration_since(session.last_seen) > timeout)
            .map(|(addr, _)| *addr)
            .collect();

        let mut removed = Vec::new();
        for addr in timed_out_addrs {
            if let Some(session) = self.remove(&addr) {
                tracing::info!(
                    "Session timed out: id={}, name={}",
                    session.session_id,
                    session.player_name
                );
                removed.push(session);
            }
        }

        removed
    }

    pub fn addrs(&self) -> Vec<SocketAddr> {
        self.sessions_by_addr.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.sessions_by_addr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions_by_addr.is_empty()
    }
}
