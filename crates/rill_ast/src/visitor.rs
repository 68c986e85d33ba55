//! A visitor over the syntax tree.
//!
//! Every `visit_*` method of [`Visitor`] defaults to the free function of the same name, which
//! walks the children of the node. Implementors override the nodes they care about and call the
//! free function to keep descending.

use crate::block::Block;
use crate::expr::{BinOp, Expr, FunctionCall, Literal, VarAccess};
use crate::items::{FunctionDecl, Param, Program};
use crate::statements::{
    Assign, ElseBranch, IfStmt, PrintlnStmt, ReturnStmt, Stmt, VarDecl, WhileStmt,
};

/// Visits the nodes of a syntax tree
pub trait Visitor {
    type Err;

    fn visit_program(&mut self, program: &Program) -> Result<(), Self::Err> {
        visit_program(self, program)
    }

    fn visit_function_decl(&mut self, function: &FunctionDecl) -> Result<(), Self::Err> {
        visit_function_decl(self, function)
    }

    fn visit_param(&mut self, _param: &Param) -> Result<(), Self::Err> {
        Ok(())
    }

    fn visit_block(&mut self, block: &Block) -> Result<(), Self::Err> {
        visit_block(self, block)
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> Result<(), Self::Err> {
        visit_stmt(self, stmt)
    }

    fn visit_var_decl(&mut self, _var_decl: &VarDecl) -> Result<(), Self::Err> {
        Ok(())
    }

    fn visit_assign(&mut self, assign: &Assign) -> Result<(), Self::Err> {
        visit_assign(self, assign)
    }

    fn visit_if_stmt(&mut self, if_stmt: &IfStmt) -> Result<(), Self::Err> {
        visit_if_stmt(self, if_stmt)
    }

    fn visit_while_stmt(&mut self, while_stmt: &WhileStmt) -> Result<(), Self::Err> {
        visit_while_stmt(self, while_stmt)
    }

    fn visit_println_stmt(&mut self, println: &PrintlnStmt) -> Result<(), Self::Err> {
        visit_println_stmt(self, println)
    }

    fn visit_return_stmt(&mut self, ret: &ReturnStmt) -> Result<(), Self::Err> {
        visit_return_stmt(self, ret)
    }

    fn visit_expr(&mut self, expr: &Expr) -> Result<(), Self::Err> {
        visit_expr(self, expr)
    }

    fn visit_bin_op(&mut self, bin_op: &BinOp) -> Result<(), Self::Err> {
        visit_bin_op(self, bin_op)
    }

    fn visit_literal(&mut self, _literal: &Literal) -> Result<(), Self::Err> {
        Ok(())
    }

    fn visit_var_access(&mut self, _var: &VarAccess) -> Result<(), Self::Err> {
        Ok(())
    }

    fn visit_function_call(&mut self, call: &FunctionCall) -> Result<(), Self::Err> {
        visit_function_call(self, call)
    }
}

pub fn visit_program<V: Visitor + ?Sized>(v: &mut V, program: &Program) -> Result<(), V::Err> {
    for function in &program.functions {
        v.visit_function_decl(function)?;
    }
    Ok(())
}

pub fn visit_function_decl<V: Visitor + ?Sized>(
    v: &mut V,
    function: &FunctionDecl,
) -> Result<(), V::Err> {
    for param in &function.params {
        v.visit_param(param)?;
    }
    v.visit_block(&function.body)
}

pub fn visit_block<V: Visitor + ?Sized>(v: &mut V, block: &Block) -> Result<(), V::Err> {
    for stmt in &block.statements {
        v.visit_stmt(stmt)?;
    }
    Ok(())
}

pub fn visit_stmt<V: Visitor + ?Sized>(v: &mut V, stmt: &Stmt) -> Result<(), V::Err> {
    match stmt {
        Stmt::VarDecl(var_decl) => v.visit_var_decl(var_decl),
        Stmt::Assign(assign) => v.visit_assign(assign),
        Stmt::If(if_stmt) => v.visit_if_stmt(if_stmt),
        Stmt::While(while_stmt) => v.visit_while_stmt(while_stmt),
        Stmt::Println(println) => v.visit_println_stmt(println),
        Stmt::Return(ret) => v.visit_return_stmt(ret),
        Stmt::Call(call) => v.visit_function_call(call),
        Stmt::Block(block) => v.visit_block(block),
    }
}

pub fn visit_assign<V: Visitor + ?Sized>(v: &mut V, assign: &Assign) -> Result<(), V::Err> {
    v.visit_expr(&assign.value)
}

pub fn visit_if_stmt<V: Visitor + ?Sized>(v: &mut V, if_stmt: &IfStmt) -> Result<(), V::Err> {
    v.visit_expr(&if_stmt.condition)?;
    v.visit_block(&if_stmt.then_branch)?;
    match &if_stmt.else_branch {
        None => Ok(()),
        Some(ElseBranch::Block(block)) => v.visit_block(block),
        Some(ElseBranch::If(else_if)) => v.visit_if_stmt(else_if),
    }
}

pub fn visit_while_stmt<V: Visitor + ?Sized>(
    v: &mut V,
    while_stmt: &WhileStmt,
) -> Result<(), V::Err> {
    v.visit_expr(&while_stmt.condition)?;
    v.visit_block(&while_stmt.body)
}

pub fn visit_println_stmt<V: Visitor + ?Sized>(
    v: &mut V,
    println: &PrintlnStmt,
) -> Result<(), V::Err> {
    for arg in &println.args {
        v.visit_expr(arg)?;
    }
    Ok(())
}

pub fn visit_return_stmt<V: Visitor + ?Sized>(v: &mut V, ret: &ReturnStmt) -> Result<(), V::Err> {
    v.visit_expr(&ret.value)
}

pub fn visit_expr<V: Visitor + ?Sized>(v: &mut V, expr: &Expr) -> Result<(), V::Err> {
    match expr {
        Expr::Binary(bin_op) => v.visit_bin_op(bin_op),
        Expr::Literal(literal) => v.visit_literal(literal),
        Expr::Var(var) => v.visit_var_access(var),
        Expr::Call(call) => v.visit_function_call(call),
    }
}

pub fn visit_bin_op<V: Visitor + ?Sized>(v: &mut V, bin_op: &BinOp) -> Result<(), V::Err> {
    v.visit_expr(&bin_op.left)?;
    v.visit_expr(&bin_op.right)
}

pub fn visit_function_call<V: Visitor + ?Sized>(
    v: &mut V,
    call: &FunctionCall,
) -> Result<(), V::Err> {
    for arg in &call.args {
        v.visit_expr(arg)?;
    }
    Ok(())
}
