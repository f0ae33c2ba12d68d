//! `pwd`: print the working directory.

use minirt_lib::{sys_getcwd, ByteSink, PATH_CAPACITY};

pub const HELP: &str = "\
Usage: pwd [-L|-P]
  -L  use PWD from the environment when it is absolute (default)
  -P  print the physical directory from the kernel
";

/// Run `pwd`. `env_pwd` is the value of `$PWD`, if set.
pub fn run<O: ByteSink, E: ByteSink>(
    args: &[&[u8]],
    env_pwd: Option<&[u8]>,
    out: &mut O,
    err: &mut E,
) -> i32 {
    let mut logical = true;
    for &arg in args {
        match arg {
            b"-L" => logical = true,
            b"-P" => logical = false,
            b"--help" => {
                out.put(HELP.as_bytes());
                return 0;
            }
            _ if arg.first() == Some(&b'-') => {
                err.put(b"pwd: invalid option\n");
                return 1;
            }
            _ => {}
        }
    }

    if logical {
        if let Some(pwd) = env_pwd.filter(|pwd| pwd.first() == Some(&b'/')) {
            out.put(pwd);
            out.put(b"\n");
            return 0;
        }
    }

    let mut buf = [0u8; PATH_CAPACITY];
    match sys_getcwd(&mut buf) {
        Ok(len) => {
            // The kernel count includes the terminator.
            out.put(&buf[..len.saturating_sub(1)]);
            out.put(b"\n");
            0
        }
        Err(errno) => {
            err.put_fmt(format_args!("pwd: {errno}\n"));
            1
        }
    }
}
