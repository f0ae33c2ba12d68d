use std::os::unix::ffi::OsStringExt;

use minirt_lib::klog::KLOG_ENV_VAR;
use minirt_lib::{klog_init_from_env, sys_exit, FdWriter};
use minirt_userland::pwd;

fn main() {
    let log = std::env::var_os(KLOG_ENV_VAR).map(OsStringExt::into_vec);
    klog_init_from_env(log.as_deref());

    let owned: Vec<Vec<u8>> = std::env::args_os().skip(1).map(OsStringExt::into_vec).collect();
    let args: Vec<&[u8]> = owned.iter().map(Vec::as_slice).collect();
    let env_pwd = std::env::var_os("PWD").map(OsStringExt::into_vec);

    let code = pwd::run(
        &args,
        env_pwd.as_deref(),
        &mut FdWriter::stdout(),
        &mut FdWriter::stderr(),
    );
    sys_exit(code);
}
