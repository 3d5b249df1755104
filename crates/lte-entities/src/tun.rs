//! Linux TUN device plumbing for the IP gateway, over raw libc

use std::ffi::CString;
use std::io;
use std::net::Ipv4Addr;
use std::os::unix::io::RawFd;

/// Linux TUN device path
const TUN_DEV_PATH: &str = "/dev/net/tun";

/// IFF_TUN flag - TUN device (layer 3)
const IFF_TUN: libc::c_short = 0x0001;

/// IFF_NO_PI flag - No packet information
const IFF_NO_PI: libc::c_short = 0x1000;

/// TUNSETIFF ioctl command
const TUNSETIFF: libc::c_ulong = 0x400454ca;

pub const IFNAMSIZ: usize = 16;

// The kernel's ifreq union spans 24 bytes; keep the padding arm so the
// ioctl never reads past our allocation
#[allow(dead_code)]
#[repr(C)]
union IfrIfru {
    ifru_flags: libc::c_short,
    ifru_addr: libc::sockaddr,
    _pad: [u8; 24],
}

/// ifreq structure for ioctl
#[repr(C)]
struct Ifreq {
    ifr_name: [libc::c_char; IFNAMSIZ],
    ifr_ifru: IfrIfru,
}

impl Ifreq {
    fn with_name(ifname: &str) -> Self {
        let mut ifr: Ifreq = unsafe { std::mem::zeroed() };
        let name_bytes = ifname.as_bytes();
        let copy_len = usize::min(name_bytes.len(), IFNAMSIZ - 1);
        for (i, &byte) in name_bytes.iter().take(copy_len).enumerate() {
            ifr.ifr_name[i] = byte as libc::c_char;
        }
        ifr
    }

    fn set_addr(&mut self, addr: Ipv4Addr) {
        let sin = libc::sockaddr_in {
            sin_family: libc::AF_INET as libc::sa_family_t,
            sin_port: 0,
            sin_addr: libc::in_addr { s_addr: u32::from(addr).to_be() },
            sin_zero: [0; 8],
        };
        unsafe {
            std::ptr::write(&mut self.ifr_ifru as *mut IfrIfru as *mut libc::sockaddr_in, sin);
        }
    }
}

fn os_err(what: &str) -> String {
    format!("{}: {}", what, io::Error::last_os_error())
}

/// Open `/dev/net/tun` and create an `IFF_TUN | IFF_NO_PI` device with the
/// given interface name. Returns the device file descriptor.
pub fn tun_open(ifname: &str) -> Result<RawFd, String> {
    let dev_path = CString::new(TUN_DEV_PATH).expect("device path contains NUL");
    let fd = unsafe { libc::open(dev_path.as_ptr(), libc::O_RDWR) };
    if fd < 0 {
        return Err(os_err("open /dev/net/tun"));
    }

    let mut ifr = Ifreq::with_name(ifname);
    ifr.ifr_ifru.ifru_flags = IFF_TUN | IFF_NO_PI;
    if unsafe { libc::ioctl(fd, TUNSETIFF, &ifr as *const Ifreq) } < 0 {
        let err = os_err("ioctl TUNSETIFF");
        unsafe { libc::close(fd) };
        return Err(err);
    }

    Ok(fd)
}

/// Assign `addr` with a /24 netmask to the interface and bring it up
pub fn configure_ipv4(ifname: &str, addr: Ipv4Addr) -> Result<(), String> {
    let sock = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM, 0) };
    if sock < 0 {
        return Err(os_err("socket"));
    }

    let result = (|| {
        let mut ifr = Ifreq::with_name(ifname);
        ifr.set_addr(addr);
        if unsafe { libc::ioctl(sock, libc::SIOCSIFADDR, &ifr as *const Ifreq) } < 0 {
            return Err(os_err("ioctl SIOCSIFADDR"));
        }

        let mut ifr = Ifreq::with_name(ifname);
        ifr.set_addr(Ipv4Addr::new(255, 255, 255, 0));
        if unsafe { libc::ioctl(sock, libc::SIOCSIFNETMASK, &ifr as *const Ifreq) } < 0 {
            return Err(os_err("ioctl SIOCSIFNETMASK"));
        }

        let mut ifr = Ifreq::with_name(ifname);
        if unsafe { libc::ioctl(sock, libc::SIOCGIFFLAGS, &mut ifr as *mut Ifreq) } < 0 {
            return Err(os_err("ioctl SIOCGIFFLAGS"));
        }
        unsafe {
            ifr.ifr_ifru.ifru_flags |= (libc::IFF_UP | libc::IFF_RUNNING) as libc::c_short;
        }
        if unsafe { libc::ioctl(sock, libc::SIOCSIFFLAGS, &ifr as *const Ifreq) } < 0 {
            return Err(os_err("ioctl SIOCSIFFLAGS"));
        }
        Ok(())
    })();

    unsafe { libc::close(sock) };
    result
}

/// Wait up to `timeout_ms` for the device to become readable, then read into
/// `buf`. Returns `Ok(None)` on poll timeout so the caller can re-check its
/// stop flag; `Ok(Some(0))` signals end-of-file.
pub fn poll_read(fd: RawFd, buf: &mut [u8], timeout_ms: i32) -> Result<Option<usize>, String> {
    let mut pfd = libc::pollfd { fd, events: libc::POLLIN, revents: 0 };
    let rc = unsafe { libc::poll(&mut pfd, 1, timeout_ms) };
    if rc < 0 {
        return Err(os_err("poll"));
    }
    if rc == 0 {
        return Ok(None);
    }

    let n = unsafe { libc::read(fd, buf.as_mut_ptr() as *mut libc::c_void, buf.len()) };
    if n < 0 {
        return Err(os_err("read"));
    }
    Ok(Some(n as usize))
}

pub fn tun_write(fd: RawFd, buf: &[u8]) -> Result<usize, String> {
    let n = unsafe { libc::write(fd, buf.as_ptr() as *const libc::c_void, buf.len()) };
    if n < 0 {
        return Err(os_err("write"));
    }
    Ok(n as usize)
}

pub fn tun_close(fd: RawFd) {
    unsafe {
        libc::close(fd);
    }
}

/// Pin the calling thread to the given CPU core
pub fn pin_current_thread(cpu: usize) {
    unsafe {
        let mut set: libc::cpu_set_t = std::mem::zeroed();
        libc::CPU_ZERO(&mut set);
        libc::CPU_SET(cpu, &mut set);
        if libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) != 0 {
            tracing::warn!("failed to pin thread to cpu {}: {}", cpu, io::Error::last_os_error());
        }
    }
}
