//! Lowers the materialization tree into SQL commands.
//!
//! Joined collections become `LEFT JOIN`s of the parent's `SELECT`: inline
//! when the child reads a single relation, otherwise as a derived table. A
//! parent that is reshaped or limited is first pushed down into a derived
//! table so the joins cannot change its rows. Split collections become
//! commands of their own.

use super::{
    alias::{unique_name, AliasTable},
    materialize::Level,
    plan::{Child, Command, ExecPlan, Field, Load, Shape, SplitLoad},
    planner::{self, RootPlan},
    ty::infer_expr_ty,
};

use strata_core::{
    query::{Aggregate, Projection, Query, Reshape, Splitting},
    schema::app::{self, PropertyId},
    stmt::{
        self, Expr, ExprColumn, ExprSet, ExprSetOp, Join, OrderByExpr, Select, SelectItem, SetOp,
        TableFactor, Type,
    },
    Error, Result, Schema,
};

use indexmap::IndexMap;

pub(crate) fn apply(schema: &Schema, root: &Level) -> Result<ExecPlan> {
    let (root, _) = Lower::new(schema).command(root, &[])?;
    Ok(ExecPlan { root })
}

/// Lowers the levels read by one command. Aliases are unique per command.
struct Lower<'a> {
    schema: &'a Schema,
    aliases: AliasTable,
}

/// A level's `SELECT` under construction.
struct Open {
    /// The projection holds every returned column, hidden ones included
    select: Select,

    /// Type of each projected column
    types: Vec<Type>,

    /// Further operands combined with `select`
    set_op: Option<(SetOp, Vec<ExprSet>)>,

    order_by: Vec<Order>,

    limit: Option<u64>,

    /// Expression reading each property in the scope of `select`
    columns: IndexMap<PropertyId, Expr>,

    /// Projecting another column would change the rows
    sealed: bool,

    shape: Shape,
}

struct Order {
    expr: OrderByExpr,
    ty: Type,
}

impl<'a> Lower<'a> {
    fn new(schema: &'a Schema) -> Self {
        Lower {
            schema,
            aliases: AliasTable::default(),
        }
    }

    fn app(&self) -> &'a app::Schema {
        &self.schema.app
    }

    /// Lowers `level` into a complete command. Also returns the expressions
    /// reading `inner` in the scope of the command's `SELECT`.
    fn command(mut self, level: &Level, inner: &[PropertyId]) -> Result<(Command, Vec<Expr>)> {
        let open = self.level(level, inner)?;

        let inner = open
            .shape
            .inner
            .iter()
            .map(|&index| open.select.projection[index].expr.clone())
            .collect();

        let (query, ret, shape) = open.close();
        log::trace!("lowered `{}`; columns={}", level.path, ret.len());

        Ok((Command { query, ret, shape }, inner))
    }

    fn level(&mut self, level: &Level, inner: &[PropertyId]) -> Result<Open> {
        let root = planner::plan_root(
            self.schema,
            &mut self.aliases,
            level.entity,
            level.from_sql.as_deref(),
        )?;

        let mut open = match &level.reshape {
            None => self.plain(level, root, false)?,
            Some(Reshape::Distinct) => self.plain(level, root, true)?,
            Some(Reshape::GroupBy {
                keys,
                aggregates,
                project_key,
            }) => self.group_by(level, root, keys, aggregates, *project_key)?,
            Some(Reshape::SetOp { op, other }) => self.set_op(level, root, *op, other)?,
        };

        let app = self.app();

        open.shape.identifier = level
            .identifier
            .iter()
            .map(|id| open.property(app, *id))
            .collect::<Result<_>>()?;

        open.shape.inner = inner
            .iter()
            .map(|id| open.property(app, *id))
            .collect::<Result<_>>()?;

        let outers = level
            .children
            .iter()
            .map(|child| {
                child
                    .correlation
                    .iter()
                    .map(|(outer, _)| open.property(app, *outer))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let joins = level.children.iter().any(|child| !child.mode.is_split());

        // Rows of a joined level must be ordered by their key so children
        // stay with their parent in a stable order.
        if joins || !inner.is_empty() {
            for index in open.shape.identifier.clone() {
                open.order_by_column(index);
            }
        }

        if joins && !open.is_simple() {
            let alias = self.aliases.reserve("s");
            open = open.wrap(alias);
        }

        for (child, outer) in level.children.iter().zip(outers) {
            let inner: Vec<PropertyId> =
                child.correlation.iter().map(|(_, inner)| *inner).collect();

            let load = match child.mode {
                Splitting::Joined => {
                    let child_open = self.level(&child.level, &inner)?;
                    Load::Joined(self.attach(&mut open, child_open, &outer))
                }
                Splitting::Split => {
                    let (command, inner) = Lower::new(self.schema).command(&child.level, &inner)?;
                    Load::Split(SplitLoad { command, inner })
                }
            };

            open.shape.children.push(Child {
                name: child.name.clone(),
                outer,
                load,
            });
        }

        Ok(open)
    }

    /// An entity or property projection, optionally `DISTINCT`.
    fn plain(&mut self, level: &Level, root: RootPlan, distinct: bool) -> Result<Open> {
        let mut open = self.select(level.filter.as_ref(), &level.projection, root)?;

        for order_by in &level.order_by {
            let expr = lower_expr(&order_by.expr, &open.columns)?;
            open.order_by.push(Order {
                ty: infer_expr_ty(self.app(), &order_by.expr),
                expr: OrderByExpr {
                    expr,
                    direction: order_by.direction,
                },
            });
        }

        open.select.distinct = distinct;
        open.sealed = distinct;
        open.limit = level.limit;
        Ok(open)
    }

    /// Selects from the root's relation, applying the mapping's filter and
    /// `filter`, and projects `projection`.
    fn select(
        &mut self,
        filter: Option<&Expr>,
        projection: &Projection,
        root: RootPlan,
    ) -> Result<Open> {
        let app = self.app();
        let RootPlan {
            source,
            columns,
            marker,
            resolver,
            filter: mapping_filter,
            ..
        } = root;

        let mut select = Select::new(source);

        if let Some(expr) = mapping_filter {
            select.and_filter(expr);
        }

        if let Some(expr) = filter {
            select.and_filter(lower_expr(expr, &columns)?);
        }

        let mut open = Open::new(select, columns);

        match projection {
            Projection::Entity => {
                open.shape.ty = Some(resolver);

                for (id, expr) in open.columns.clone() {
                    let property = app.property(id);
                    let index = open.push(expr, &property.name, property.ty);

                    open.shape.fields.push(Field {
                        name: property.name.clone(),
                        index,
                        owner: Some(id.entity),
                    });
                }

                if let Some(marker) = marker {
                    open.shape.marker = Some(open.push(marker.expr, &marker.name, Type::String));
                }
            }
            Projection::Properties(properties) => {
                for id in properties {
                    let index = open.property(app, *id)?;

                    open.shape.fields.push(Field {
                        name: app.property(*id).name.clone(),
                        index,
                        owner: None,
                    });
                }
            }
        }

        Ok(open)
    }

    fn group_by(
        &mut self,
        level: &Level,
        root: RootPlan,
        keys: &[PropertyId],
        aggregates: &[Aggregate],
        project_key: bool,
    ) -> Result<Open> {
        let app = self.app();
        let mut open = self.select(level.filter.as_ref(), &Projection::Properties(vec![]), root)?;

        let key_exprs = keys
            .iter()
            .map(|id| lower_expr(&Expr::Property(*id), &open.columns))
            .collect::<Result<Vec<_>>>()?;

        open.select.group_by = key_exprs.clone();

        let mut columns = IndexMap::new();

        if project_key {
            for (id, expr) in keys.iter().zip(key_exprs) {
                let property = app.property(*id);
                let index = open.push(expr.clone(), &property.name, property.ty);

                open.shape.fields.push(Field {
                    name: property.name.clone(),
                    index,
                    owner: None,
                });

                columns.insert(*id, expr);
            }
        }

        for aggregate in aggregates {
            let (expr, ty) = match aggregate.property {
                Some(id) => {
                    let arg = lower_expr(&Expr::Property(id), &open.columns)?;
                    let ty = infer_expr_ty(app, &Expr::func(aggregate.kind, id));
                    (Expr::func(aggregate.kind, arg), ty)
                }
                None => (Expr::count_star(), Type::I64),
            };

            let index = open.push(expr, &aggregate.name, ty);
            open.shape.fields.push(Field {
                name: aggregate.name.clone(),
                index,
                owner: None,
            });
        }

        for order_by in &level.order_by {
            let expr = lower_expr(&order_by.expr, &open.columns)?;
            open.order_by.push(Order {
                ty: infer_expr_ty(app, &order_by.expr),
                expr: OrderByExpr {
                    expr,
                    direction: order_by.direction,
                },
            });
        }

        open.columns = columns;
        open.sealed = true;
        open.limit = level.limit;
        Ok(open)
    }

    fn set_op(&mut self, level: &Level, root: RootPlan, op: SetOp, other: &Query) -> Result<Open> {
        let mut open = self.select(level.filter.as_ref(), &level.projection, root)?;

        let other_root = planner::plan_root(
            self.schema,
            &mut self.aliases,
            other.root,
            other.from_sql.as_deref(),
        )?;
        let operand = self.select(other.filter.as_ref(), &other.projection, other_root)?;

        if operand.select.projection.len() != open.select.projection.len() {
            return Err(Error::translation_failure(format!(
                "set operation operands return {} and {} columns",
                open.select.projection.len(),
                operand.select.projection.len()
            )));
        }

        for order_by in &level.order_by {
            let Expr::Property(id) = &order_by.expr else {
                return Err(Error::translation_failure(
                    "a set operation can only be ordered by projected properties",
                ));
            };

            let index = open.property(self.app(), *id)?;
            let name = open.select.projection[index].alias.clone();

            open.order_by.push(Order {
                expr: OrderByExpr {
                    expr: Expr::output_column(name),
                    direction: order_by.direction,
                },
                ty: open.types[index],
            });
        }

        open.set_op = Some((op, vec![ExprSet::from(operand.select)]));
        open.sealed = true;
        open.limit = level.limit;
        Ok(open)
    }

    /// Left joins `child` into `parent` and returns the child's shape in the
    /// parent's columns.
    fn attach(&mut self, parent: &mut Open, child: Open, outer: &[usize]) -> Shape {
        let mut child = if child.select.source.joins.is_empty() {
            child
        } else {
            let alias = self.aliases.reserve("t");
            child.wrap(alias)
        };

        let mut on = Expr::and_from_vec(
            outer
                .iter()
                .zip(&child.shape.inner)
                .map(|(&outer, &inner)| {
                    Expr::eq(
                        parent.select.projection[outer].expr.clone(),
                        child.select.projection[inner].expr.clone(),
                    )
                })
                .collect(),
        );

        if let Some(filter) = child.select.filter.take() {
            on = Expr::and(on, filter);
        }

        let Open {
            select,
            types,
            order_by,
            mut shape,
            ..
        } = child;

        shape.shift(parent.select.projection.len());

        parent
            .select
            .source
            .joins
            .push(Join::left(select.source.relation, on));
        parent.select.projection.extend(select.projection);
        parent.types.extend(types);
        parent.order_by.extend(order_by);

        shape
    }
}

impl Open {
    fn new(select: Select, columns: IndexMap<PropertyId, Expr>) -> Open {
        Open {
            select,
            types: vec![],
            set_op: None,
            order_by: vec![],
            limit: None,
            columns,
            sealed: false,
            shape: Shape::new(None),
        }
    }

    fn is_simple(&self) -> bool {
        !self.sealed && self.limit.is_none() && self.set_op.is_none()
    }

    fn push(&mut self, expr: Expr, name: &str, ty: Type) -> usize {
        self.select.projection.push(SelectItem {
            expr,
            alias: name.to_string(),
        });
        self.types.push(ty);
        self.select.projection.len() - 1
    }

    fn position(&self, expr: &Expr) -> Option<usize> {
        self.select
            .projection
            .iter()
            .position(|item| item.expr == *expr)
    }

    /// The column returning `id`, projected as a hidden column if needed.
    fn property(&mut self, app: &app::Schema, id: PropertyId) -> Result<usize> {
        let property = app.property(id);

        let Some(expr) = self.columns.get(&id).cloned() else {
            strata_core::bail!("`{}` is not readable at this level", property.name);
        };

        if let Some(index) = self.position(&expr) {
            return Ok(index);
        }

        if self.sealed {
            strata_core::bail!("`{}` is not projected", property.name);
        }

        Ok(self.push(expr, &property.name, property.ty))
    }

    /// Orders by the column at `index` unless it already is.
    fn order_by_column(&mut self, index: usize) {
        let expr = if self.set_op.is_some() {
            Expr::output_column(&self.select.projection[index].alias)
        } else {
            self.select.projection[index].expr.clone()
        };

        if self.order_by.iter().all(|order| order.expr.expr != expr) {
            self.order_by.push(Order {
                expr: OrderByExpr::asc(expr),
                ty: self.types[index],
            });
        }
    }

    /// Pushes this level down into a derived table aliased `alias` and
    /// returns a `SELECT` over it. Column positions are preserved.
    fn wrap(mut self, alias: String) -> Open {
        let orders = std::mem::take(&mut self.order_by);
        let mut outer_order = vec![];

        for order in &orders {
            let found = match &order.expr.expr {
                Expr::Column(ExprColumn {
                    table: None,
                    column,
                }) => self.select.position(column),
                expr => self.position(expr),
            };

            let index = match found {
                Some(index) => index,
                None => self.push(order.expr.expr.clone(), "o", order.ty),
            };

            outer_order.push((index, order.expr.direction, order.ty));
        }

        // Columns of a derived table must have distinct names.
        let mut names: Vec<String> = vec![];
        for item in &mut self.select.projection {
            let name = unique_name(&item.alias, |name| names.iter().any(|used| used == name));
            item.alias = name.clone();
            names.push(name);
        }

        let columns = self
            .columns
            .iter()
            .filter_map(|(id, expr)| {
                let index = self.position(expr)?;
                Some((*id, Expr::column(&alias, &names[index])))
            })
            .collect();

        // Ordering only matters inside the derived table when it is limited.
        let inner_order = match self.limit {
            Some(_) => orders.into_iter().map(|order| order.expr).collect(),
            None => vec![],
        };

        let Open {
            select,
            types,
            set_op,
            limit,
            shape,
            ..
        } = self;

        let query = stmt::Query {
            body: body(select, set_op),
            order_by: inner_order,
            limit,
        };

        let mut select = Select::new(TableFactor::Derived {
            query: Box::new(query),
            alias: alias.clone(),
        });

        select.projection = names
            .iter()
            .map(|name| SelectItem {
                expr: Expr::column(&alias, name),
                alias: name.clone(),
            })
            .collect();

        let order_by = outer_order
            .into_iter()
            .map(|(index, direction, ty)| Order {
                expr: OrderByExpr {
                    expr: Expr::column(&alias, &names[index]),
                    direction,
                },
                ty,
            })
            .collect();

        Open {
            select,
            types,
            set_op: None,
            order_by,
            limit: None,
            columns,
            sealed: false,
            shape,
        }
    }

    fn close(self) -> (stmt::Query, Vec<Type>, Shape) {
        let Open {
            select,
            types,
            set_op,
            order_by,
            limit,
            shape,
            ..
        } = self;

        let query = stmt::Query {
            body: body(select, set_op),
            order_by: order_by.into_iter().map(|order| order.expr).collect(),
            limit,
        };

        (query, types, shape)
    }
}

fn body(select: Select, set_op: Option<(SetOp, Vec<ExprSet>)>) -> ExprSet {
    match set_op {
        Some((op, others)) => {
            let mut operands = vec![ExprSet::from(select)];
            operands.extend(others);
            ExprSetOp { op, operands }.into()
        }
        None => select.into(),
    }
}

/// Replaces property references with the expressions reading them.
fn lower_expr(expr: &Expr, columns: &IndexMap<PropertyId, Expr>) -> Result<Expr> {
    let mut expr = expr.clone();
    let mut missing = None;

    stmt::visit_mut::for_each_expr_mut(&mut expr, |expr| {
        if let Expr::Property(id) = expr {
            match columns.get(id) {
                Some(column) => *expr = column.clone(),
                None => missing = Some(*id),
            }
        }
    });

    if let Some(id) = missing {
        strata_core::bail!("property {id:?} is not readable at this level");
    }

    Ok(expr)
}
